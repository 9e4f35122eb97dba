use crate::config::ResourcePaths;
use crate::core::cache::MemoCache;
use crate::core::dom::{parse_first_element, parse_fragment, Element, Node};
use crate::core::slots::{missing_slots, CardKind, Presence};
use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, SiteError};
use std::sync::Arc;

/// Loads card templates and page partials once and hands out shared copies.
pub struct TemplateLoader {
    fetcher: Arc<dyn Fetcher>,
    paths: ResourcePaths,
    templates: MemoCache<String, Element>,
    fragments: MemoCache<String, Vec<Node>>,
}

impl TemplateLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, paths: ResourcePaths) -> Self {
        Self {
            fetcher,
            paths,
            templates: MemoCache::new(),
            fragments: MemoCache::new(),
        }
    }

    pub async fn load(&self, kind: CardKind) -> Result<Arc<Element>> {
        let resource = self.paths.template(kind).to_string();
        self.templates
            .get_or_try_load(&resource, || self.fetch_template(kind, &resource))
            .await
    }

    async fn fetch_template(&self, kind: CardKind, resource: &str) -> Result<Element> {
        let markup = self.fetcher.fetch_text(resource).await?;
        let template = parse_first_element(&markup)
            .ok_or_else(|| SiteError::parse(resource, "template has no root element"))?;

        for (slot, presence) in missing_slots(kind, &template) {
            match presence {
                Presence::Required => tracing::warn!(
                    "⚠️ {} template {} has no '{}' slot",
                    kind.name(),
                    resource,
                    slot
                ),
                Presence::Optional => {
                    tracing::debug!("{} template {} has no '{}' slot", kind.name(), resource, slot)
                }
            }
        }

        tracing::debug!("Loaded {} template from {}", kind.name(), resource);
        Ok(template)
    }

    /// Markup for an `innerHTML`-style injection (navbar, footer).
    pub async fn load_fragment(&self, resource: &str) -> Result<Arc<Vec<Node>>> {
        let key = resource.to_string();
        self.fragments
            .get_or_try_load(&key, || async {
                let markup = self.fetcher.fetch_text(resource).await?;
                Ok(parse_fragment(&markup))
            })
            .await
    }

    pub async fn cached_templates(&self) -> usize {
        self.templates.len().await
    }
}
