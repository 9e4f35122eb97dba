// Adapters layer: concrete implementations of the domain ports (fetching site resources, writing output).

pub mod http;
pub mod local;

pub use http::HttpFetcher;
pub use local::{DirectoryFetcher, LocalStorage};
