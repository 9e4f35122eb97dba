#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::slots::CardKind;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_PAGE: &str = "index.html";
pub const DEFAULT_LEGACY_EVENT_SECTIONS: [&str; 3] = ["events-2023", "events-2024", "events-2025"];

/// Site-relative locations of every resource the renderer fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    pub event_card_template: String,
    pub partner_template: String,
    pub member_template: String,
    pub provider_template: String,
    pub navbar: String,
    pub footer: String,
    pub events_data: String,
    pub partners_data: String,
    pub team_data_dir: String,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            event_card_template: "components/event-card.html".to_string(),
            partner_template: "components/partner.html".to_string(),
            member_template: "components/member.html".to_string(),
            provider_template: "components/provider.html".to_string(),
            navbar: "components/navbar.html".to_string(),
            footer: "components/footer.html".to_string(),
            events_data: "data/meetings.json".to_string(),
            partners_data: "data/partners.json".to_string(),
            team_data_dir: "data/team-information".to_string(),
        }
    }
}

impl ResourcePaths {
    pub fn template(&self, kind: CardKind) -> &str {
        match kind {
            CardKind::Event => &self.event_card_template,
            CardKind::Partner => &self.partner_template,
            CardKind::Member => &self.member_template,
            CardKind::Provider => &self.provider_template,
        }
    }

    pub fn all(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("resources.event_card_template", &self.event_card_template),
            ("resources.partner_template", &self.partner_template),
            ("resources.member_template", &self.member_template),
            ("resources.provider_template", &self.provider_template),
            ("resources.navbar", &self.navbar),
            ("resources.footer", &self.footer),
            ("resources.events_data", &self.events_data),
            ("resources.partners_data", &self.partners_data),
            ("resources.team_data_dir", &self.team_data_dir),
        ]
    }
}

pub(crate) fn default_legacy_sections() -> Vec<String> {
    DEFAULT_LEGACY_EVENT_SECTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
