pub mod cache;
pub mod cards;
pub mod data;
pub mod dom;
pub mod engine;
pub mod ordering;
pub mod page;
pub mod partials;
pub mod render;
pub mod site;
pub mod slots;
pub mod template;

pub use crate::domain::ports::{ConfigProvider, Fetcher, Storage};
pub use crate::utils::error::Result;
