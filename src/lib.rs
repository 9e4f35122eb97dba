pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{DirectoryFetcher, HttpFetcher, LocalStorage};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ResourcePaths, TomlConfig};

pub use crate::core::{
    data::TeamCategory,
    engine::SiteEngine,
    page::Page,
    render::{CollectionRenderer, RenderOutcome, RenderTarget},
    site::SiteContext,
};
pub use domain::ports::{ConfigProvider, Fetcher, SiteSource, Storage};
pub use utils::error::{Result, SiteError};
