use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads resources from a checked-out site directory.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Fetcher for DirectoryFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String> {
        let full_path = self.root.join(resource.trim_start_matches('/'));
        tracing::debug!("Reading {}", full_path.display());

        match tokio::fs::read_to_string(&full_path).await {
            Ok(text) => Ok(text),
            // 與 HTTP 來源一致：找不到檔案視為 404
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SiteError::HttpStatusError {
                resource: resource.to_string(),
                status: 404,
            }),
            Err(source) => Err(SiteError::IoError {
                resource: resource.to_string(),
                source,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        let io_error = |source: std::io::Error| SiteError::IoError {
            resource: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(&io_error)?;
        }

        tokio::fs::write(&full_path, data).await.map_err(&io_error)?;
        Ok(())
    }
}
