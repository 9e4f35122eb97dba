use crate::core::page::Page;
use crate::core::partials::{initial_team_category, set_active_tab, PartialInjector};
use crate::core::render::{
    CollectionRenderer, RenderOutcome, RenderTarget, EVENTS_CONTAINER, PARTNERS_CONTAINER,
    TEAM_CONTAINER,
};
use crate::core::site::SiteContext;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use std::sync::Arc;

/// Prerenders each configured page: fetch, inject partials, fill collections, store.
pub struct SiteEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    context: Arc<SiteContext>,
    partials: PartialInjector,
    renderer: CollectionRenderer,
}

impl<S: Storage, C: ConfigProvider> SiteEngine<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let context = Arc::new(SiteContext::from_source(
            &config.source()?,
            config.resources().clone(),
        )?);
        Ok(Self::with_context(storage, config, context))
    }

    pub fn with_context(storage: S, config: C, context: Arc<SiteContext>) -> Self {
        let renderer =
            CollectionRenderer::new(context.clone(), config.legacy_event_sections().to_vec());
        Self {
            partials: PartialInjector::new(context.clone()),
            renderer,
            storage,
            config,
            context,
        }
    }

    pub fn context(&self) -> &Arc<SiteContext> {
        &self.context
    }

    /// Renders and writes every page; the first page that cannot be fetched aborts the run.
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Starting render of {} page(s)", self.config.pages().len());

        let mut written = Vec::with_capacity(self.config.pages().len());
        for page_name in self.config.pages() {
            let html = self.render_page(page_name).await?;

            tracing::debug!("Writing {} ({} bytes)", page_name, html.len());
            self.storage.write_file(page_name, html.as_bytes()).await?;
            written.push(format!("{}/{}", self.config.output_path(), page_name));
        }

        tracing::info!("✅ Rendered {} page(s)", written.len());
        Ok(written)
    }

    /// Renders one page to its final markup without storing it.
    pub async fn render_page(&self, page_name: &str) -> Result<String> {
        tracing::info!("📄 Rendering {}", page_name);
        let markup = self.context.fetcher().fetch_text(page_name).await?;
        let page = Page::parse(page_name, &markup);

        self.partials.inject_all(&page).await;

        let team_target = if page.has_element(TEAM_CONTAINER).await {
            let category = initial_team_category(self.config.team_category());
            page.with_document(|doc| set_active_tab(&mut doc.root, category))
                .await;
            Some(RenderTarget::Team(category.slug().to_string()))
        } else {
            None
        };

        // disjoint containers, so the renders can overlap
        let (events, partners, team) = tokio::join!(
            self.render_if_present(&page, RenderTarget::Events, EVENTS_CONTAINER),
            self.render_if_present(&page, RenderTarget::Partners, PARTNERS_CONTAINER),
            async {
                match &team_target {
                    Some(target) => self.renderer.render(&page, target).await,
                    None => None,
                }
            }
        );
        tracing::debug!(
            "{}: events={:?} partners={:?} team={:?}",
            page_name,
            events,
            partners,
            team
        );

        Ok(page.to_html().await)
    }

    async fn render_if_present(
        &self,
        page: &Page,
        target: RenderTarget,
        container_id: &str,
    ) -> Option<RenderOutcome> {
        if !page.has_element(container_id).await {
            return None;
        }
        self.renderer.render(page, &target).await
    }
}
