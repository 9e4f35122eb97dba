use crate::config::ResourcePaths;
use crate::core::cache::MemoCache;
use crate::domain::model::{PartnerRecord, ProviderRecord, TeamMemberRecord, YearGroup};
use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, SiteError};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The team page tabs. Each maps to its own JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeamCategory {
    #[default]
    CoreTeam,
    PractitionerAdvisoryBoard,
    NationalAdvisoryBoard,
    TutoringProviders,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 4] = [
        TeamCategory::CoreTeam,
        TeamCategory::PractitionerAdvisoryBoard,
        TeamCategory::NationalAdvisoryBoard,
        TeamCategory::TutoringProviders,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TeamCategory::CoreTeam => "core-team",
            TeamCategory::PractitionerAdvisoryBoard => "practitioner-advisory-board",
            TeamCategory::NationalAdvisoryBoard => "national-advisory-board",
            TeamCategory::TutoringProviders => "tutoring-providers",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug())
    }
}

impl fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TeamCategory {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        TeamCategory::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| SiteError::UnknownKeyError { key: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKey {
    Events,
    Partners,
    Team(TeamCategory),
}

/// Tutoring providers use their own record shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamData {
    Members(Vec<TeamMemberRecord>),
    Providers(Vec<ProviderRecord>),
}

impl TeamData {
    pub fn len(&self) -> usize {
        match self {
            TeamData::Members(members) => members.len(),
            TeamData::Providers(providers) => providers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct DataLoader {
    fetcher: Arc<dyn Fetcher>,
    paths: ResourcePaths,
    events: MemoCache<DataKey, Vec<YearGroup>>,
    partners: MemoCache<DataKey, Vec<PartnerRecord>>,
    team: MemoCache<DataKey, TeamData>,
}

impl DataLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>, paths: ResourcePaths) -> Self {
        Self {
            fetcher,
            paths,
            events: MemoCache::new(),
            partners: MemoCache::new(),
            team: MemoCache::new(),
        }
    }

    pub fn resource_path(&self, key: DataKey) -> String {
        match key {
            DataKey::Events => self.paths.events_data.clone(),
            DataKey::Partners => self.paths.partners_data.clone(),
            DataKey::Team(category) => format!(
                "{}/{}",
                self.paths.team_data_dir.trim_end_matches('/'),
                category.file_name()
            ),
        }
    }

    pub async fn events(&self) -> Result<Arc<Vec<YearGroup>>> {
        let key = DataKey::Events;
        self.events
            .get_or_try_load(&key, || self.fetch_list(key))
            .await
    }

    pub async fn partners(&self) -> Result<Arc<Vec<PartnerRecord>>> {
        let key = DataKey::Partners;
        self.partners
            .get_or_try_load(&key, || self.fetch_list(key))
            .await
    }

    /// Team data by tab slug; unknown slugs fail before anything is fetched.
    pub async fn team(&self, category: &str) -> Result<Arc<TeamData>> {
        let category = TeamCategory::from_str(category)?;
        self.team_category(category).await
    }

    pub async fn team_category(&self, category: TeamCategory) -> Result<Arc<TeamData>> {
        let key = DataKey::Team(category);
        self.team
            .get_or_try_load(&key, || async move {
                Ok(match category {
                    TeamCategory::TutoringProviders => TeamData::Providers(self.fetch_list(key).await?),
                    _ => TeamData::Members(self.fetch_list(key).await?),
                })
            })
            .await
    }

    async fn fetch_list<T: DeserializeOwned>(&self, key: DataKey) -> Result<Vec<T>> {
        let resource = self.resource_path(key);
        let body = self.fetcher.fetch_text(&resource).await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SiteError::parse(&resource, e))?;
        if !value.is_array() {
            tracing::warn!("⚠️ {} is not a JSON array, treating it as empty", resource);
            return Ok(Vec::new());
        }

        let records: Vec<T> =
            serde_json::from_value(value).map_err(|e| SiteError::parse(&resource, e))?;
        tracing::debug!("Loaded {} records from {}", records.len(), resource);
        Ok(records)
    }
}
