//! Shared page chrome: navbar/footer injection, active nav link, team tabs.

use crate::core::data::TeamCategory;
use crate::core::dom::{Element, Node, Selector};
use crate::core::page::Page;
use crate::core::site::SiteContext;
use crate::utils::error::Result;
use std::str::FromStr;
use std::sync::Arc;

pub const NAVBAR_CONTAINER: &str = "navbar-container";
pub const FOOTER_CONTAINER: &str = "footer-container";

const ERROR_BOX_STYLE: &str =
    "padding: 20px; background: #ffebee; color: #c62828; border: 1px solid #c62828; border-radius: 4px;";

pub struct PartialInjector {
    context: Arc<SiteContext>,
}

impl PartialInjector {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }

    /// Injects the navbar and footer into whichever of their containers the page has.
    pub async fn inject_all(&self, page: &Page) {
        let navbar = self.context.paths().navbar.clone();
        let footer = self.context.paths().footer.clone();

        if page.has_element(NAVBAR_CONTAINER).await {
            self.inject(page, NAVBAR_CONTAINER, &navbar).await;
        }
        if page.has_element(FOOTER_CONTAINER).await {
            self.inject(page, FOOTER_CONTAINER, &footer).await;
        }
    }

    /// Replaces the container's content with the fragment at `resource`.
    /// Returns `false` when the container is missing or the fragment failed
    /// to load; in the latter case an error box takes its place.
    pub async fn inject(&self, page: &Page, container_id: &str, resource: &str) -> bool {
        match self.try_inject(page, container_id, resource).await {
            Ok(injected) => injected,
            Err(e) => {
                tracing::error!("❌ Error loading component {}: {}", resource, e);
                page.with_document(|doc| {
                    if let Some(container) = doc.element_by_id_mut(container_id) {
                        container.clear_children();
                        container.append(loading_error(resource));
                    }
                })
                .await;
                false
            }
        }
    }

    async fn try_inject(&self, page: &Page, container_id: &str, resource: &str) -> Result<bool> {
        let fragment = self.context.templates().load_fragment(resource).await?;
        let page_name = page.name().to_string();

        let injected = page
            .with_document(|doc| {
                let Some(container) = doc.element_by_id_mut(container_id) else {
                    return false;
                };
                container.children = fragment.to_vec();
                if container_id == NAVBAR_CONTAINER {
                    mark_active_nav_link(container, &page_name);
                }
                true
            })
            .await;

        if injected {
            tracing::debug!("Injected {} into #{} on {}", resource, container_id, page_name);
        } else {
            tracing::error!("Container element {} not found on {}", container_id, page_name);
        }
        Ok(injected)
    }
}

fn loading_error(resource: &str) -> Element {
    Element::new("div")
        .with_attr("style", ERROR_BOX_STYLE)
        .with_child(Element::new("strong").with_text("Component Loading Error:"))
        .with_child(Element::new("br"))
        .with_child(Node::Text(format!("Could not load {}.", resource)))
        .with_child(Element::new("br"))
        .with_child(Element::new("small").with_text(
            "Check that the site root or origin serves this file.",
        ))
}

/// `#navbarNav .nav-link` whose `href` is the page's file name gets `active`;
/// the rest lose it. Only the last path segment is compared.
pub fn mark_active_nav_link(navbar: &mut Element, page_name: &str) {
    let current = page_name
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(crate::config::DEFAULT_PAGE);

    let Some(nav) = navbar.find_mut(&Selector::Id("navbarNav")) else {
        return;
    };
    nav.for_each_mut(&Selector::Class("nav-link"), &mut |link: &mut Element| {
        if link.attr("href") == Some(current) {
            link.add_class("active");
        } else {
            link.remove_class("active");
        }
    });
}

/// Resolves the initially selected team tab; anything unknown falls back to the core team.
pub fn initial_team_category(requested: Option<&str>) -> TeamCategory {
    match requested {
        Some(slug) => TeamCategory::from_str(slug).unwrap_or_else(|_| {
            tracing::warn!("⚠️ Unknown team category '{}', showing {}", slug, TeamCategory::default());
            TeamCategory::default()
        }),
        None => TeamCategory::default(),
    }
}

/// Highlights the `.team-tab` for `category` and resets the others.
pub fn set_active_tab(root: &mut Element, category: TeamCategory) {
    root.for_each_mut(&Selector::Class("team-tab"), &mut |tab: &mut Element| {
        if tab.attr("data-category") == Some(category.slug()) {
            tab.add_class("active");
            tab.add_class("btn-primary");
            tab.remove_class("btn-outline-dark");
        } else {
            tab.remove_class("active");
            tab.remove_class("btn-primary");
            tab.add_class("btn-outline-dark");
        }
    });
}
