use crate::adapters::{DirectoryFetcher, HttpFetcher};
use crate::config::ResourcePaths;
use crate::core::data::DataLoader;
use crate::core::template::TemplateLoader;
use crate::domain::ports::{Fetcher, SiteSource};
use crate::utils::error::Result;
use std::sync::Arc;

/// Everything renderers share for one site: the fetcher and both memoizing loaders.
pub struct SiteContext {
    fetcher: Arc<dyn Fetcher>,
    paths: ResourcePaths,
    templates: TemplateLoader,
    data: DataLoader,
}

impl SiteContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, paths: ResourcePaths) -> Self {
        Self {
            templates: TemplateLoader::new(fetcher.clone(), paths.clone()),
            data: DataLoader::new(fetcher.clone(), paths.clone()),
            fetcher,
            paths,
        }
    }

    pub fn from_source(source: &SiteSource, paths: ResourcePaths) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = match source {
            SiteSource::Http(base_url) => {
                tracing::info!("🌐 Fetching site resources from {}", base_url);
                Arc::new(HttpFetcher::new(base_url)?)
            }
            SiteSource::Directory(root) => {
                tracing::info!("📁 Reading site resources from {}", root);
                Arc::new(DirectoryFetcher::new(root))
            }
        };
        Ok(Self::new(fetcher, paths))
    }

    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    pub fn paths(&self) -> &ResourcePaths {
        &self.paths
    }

    pub fn templates(&self) -> &TemplateLoader {
        &self.templates
    }

    pub fn data(&self) -> &DataLoader {
        &self.data
    }
}
