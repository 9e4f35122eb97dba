//! Collection Renderer: turns a data resource into a populated container.

use crate::core::cards::{build_event_card, build_member_card, build_partner_card, build_provider_card};
use crate::core::data::{TeamCategory, TeamData};
use crate::core::dom::{Element, Node, Selector};
use crate::core::ordering::order_year_groups;
use crate::core::page::Page;
use crate::core::site::SiteContext;
use crate::core::slots::CardKind;
use crate::domain::model::YearGroup;
use crate::utils::error::Result;
use std::str::FromStr;
use std::sync::Arc;

pub const EVENTS_CONTAINER: &str = "events-container";
pub const PARTNERS_CONTAINER: &str = "partners-grid";
pub const TEAM_CONTAINER: &str = "team-members-container";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    Events,
    Partners,
    /// Team tab by slug, as it appears in the page's `data-category` attributes.
    Team(String),
}

impl RenderTarget {
    pub fn container_id(&self) -> &'static str {
        match self {
            RenderTarget::Events => EVENTS_CONTAINER,
            RenderTarget::Partners => PARTNERS_CONTAINER,
            RenderTarget::Team(_) => TEAM_CONTAINER,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RenderTarget::Events => "events".to_string(),
            RenderTarget::Partners => "partners".to_string(),
            RenderTarget::Team(category) => format!("team members for {}", category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(usize),
    /// Data loaded but had no entries; the container stays empty.
    Empty,
    /// The page has no mount point for this target.
    NoContainer,
    /// A newer render of the same container started before this one finished.
    Superseded,
}

pub struct CollectionRenderer {
    context: Arc<SiteContext>,
    legacy_event_sections: Vec<String>,
}

impl CollectionRenderer {
    pub fn new(context: Arc<SiteContext>, legacy_event_sections: Vec<String>) -> Self {
        Self {
            context,
            legacy_event_sections,
        }
    }

    /// Renders and logs failures instead of returning them.
    pub async fn render(&self, page: &Page, target: &RenderTarget) -> Option<RenderOutcome> {
        match self.try_render(page, target).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(
                    "❌ Error rendering {} on {}: {}",
                    target.describe(),
                    page.name(),
                    e
                );
                None
            }
        }
    }

    pub async fn try_render(&self, page: &Page, target: &RenderTarget) -> Result<RenderOutcome> {
        let container_id = target.container_id();

        if *target == RenderTarget::Events {
            self.hide_legacy_event_sections(page).await;
        }

        let Some(token) = page.begin_render(container_id).await else {
            tracing::debug!("{} has no #{}, skipping {}", page.name(), container_id, target.describe());
            return Ok(RenderOutcome::NoContainer);
        };

        let nodes = match target {
            RenderTarget::Events => self.event_sections().await?,
            RenderTarget::Partners => self.partner_cards().await?,
            RenderTarget::Team(category) => self.team_cards(category).await?,
        };

        if nodes.is_empty() {
            tracing::warn!("⚠️ No entries found for {} on {}", target.describe(), page.name());
            return Ok(RenderOutcome::Empty);
        }

        let count = nodes.len();
        if !page.commit_render(container_id, token, nodes).await {
            tracing::debug!(
                "Discarding stale render of #{} on {}",
                container_id,
                page.name()
            );
            return Ok(RenderOutcome::Superseded);
        }

        tracing::info!("✅ Rendered {} {} on {}", count, target.describe(), page.name());
        Ok(RenderOutcome::Rendered(count))
    }

    async fn hide_legacy_event_sections(&self, page: &Page) {
        if !page.has_element(EVENTS_CONTAINER).await {
            return;
        }
        page.with_document(|doc| {
            for id in &self.legacy_event_sections {
                if let Some(section) = doc
                    .root
                    .closest_mut(&Selector::Id(id), &Selector::Tag("section"))
                {
                    section.hide();
                }
            }
        })
        .await;
    }

    async fn event_sections(&self) -> Result<Vec<Node>> {
        let (template, years) = tokio::try_join!(
            self.context.templates().load(CardKind::Event),
            self.context.data().events()
        )?;

        Ok(order_year_groups(&years)
            .iter()
            .map(|group| year_section(group, &template).into())
            .collect())
    }

    async fn partner_cards(&self) -> Result<Vec<Node>> {
        let (template, partners) = tokio::try_join!(
            self.context.templates().load(CardKind::Partner),
            self.context.data().partners()
        )?;

        Ok(partners
            .iter()
            .map(|partner| build_partner_card(partner, &template).into())
            .collect())
    }

    async fn team_cards(&self, category: &str) -> Result<Vec<Node>> {
        let category = TeamCategory::from_str(category)?;
        let kind = match category {
            TeamCategory::TutoringProviders => CardKind::Provider,
            _ => CardKind::Member,
        };

        let (template, data) = tokio::try_join!(
            self.context.templates().load(kind),
            self.context.data().team_category(category)
        )?;

        let cards: Vec<Node> = match &*data {
            TeamData::Members(members) => members
                .iter()
                .map(|member| build_member_card(member, &template, category.slug()).into())
                .collect(),
            TeamData::Providers(providers) => providers
                .iter()
                .map(|provider| build_provider_card(provider, &template).into())
                .collect(),
        };
        Ok(cards)
    }
}

/// `<section>` with the year heading and a row of event cards.
fn year_section(group: &YearGroup, template: &Element) -> Element {
    let heading = Element::new("h3")
        .with_class("fw-semibold mb-0")
        .with_attr("style", "font-size: 32px; line-height: 48px; color: #222222;")
        .with_text(&group.year.to_string());

    let mut row = Element::new("div").with_class("row g-3");
    for event in &group.events {
        row.append(build_event_card(event, template));
    }

    let wrapper = Element::new("div")
        .with_class("d-flex flex-column gap-4")
        .with_child(
            Element::new("div")
                .with_class("d-flex flex-column gap-1")
                .with_child(heading),
        )
        .with_child(row);

    Element::new("section").with_class("pb-5").with_child(wrapper)
}
