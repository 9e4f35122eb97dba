use crate::config::ResourcePaths;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of site resources (pages, HTML fragments, JSON data), addressed by
/// their path relative to the site root.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, resource: &str) -> Result<String>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where resources come from: one of the two must be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSource {
    Http(String),
    Directory(String),
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> Result<SiteSource>;
    fn output_path(&self) -> &str;
    fn pages(&self) -> &[String];
    fn team_category(&self) -> Option<&str>;
    fn legacy_event_sections(&self) -> &[String];
    fn resources(&self) -> &ResourcePaths;
}
