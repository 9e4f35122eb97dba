use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches resources relative to a site origin, the way the browser resolves
/// relative `fetch()` paths against the page URL.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| SiteError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        // 沒有結尾斜線時 join 會把最後一段當作檔名替換掉
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    pub fn resolve(&self, resource: &str) -> Result<Url> {
        self.base
            .join(resource.trim_start_matches('/'))
            .map_err(|e| SiteError::ConfigError {
                message: format!("Cannot resolve {} against {}: {}", resource, self.base, e),
            })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String> {
        let url = self.resolve(resource)?;
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SiteError::TransportError {
                resource: resource.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Response status for {}: {}", resource, status);
        if !status.is_success() {
            return Err(SiteError::HttpStatusError {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| SiteError::TransportError {
                resource: resource.to_string(),
                source,
            })
    }
}
