use crate::config::{default_legacy_sections, ResourcePaths, DEFAULT_PAGE};
use crate::domain::ports::{ConfigProvider, SiteSource};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_directory, validate_pages, validate_site_origin, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "site-render")]
#[command(about = "Prerender the site's data-driven sections into static HTML")]
pub struct CliConfig {
    /// Site origin to fetch pages, components and data from
    #[arg(long, conflicts_with = "site_root")]
    pub base_url: Option<String>,

    /// Local site directory to read pages, components and data from
    #[arg(long)]
    pub site_root: Option<String>,

    #[arg(long, default_value = "./dist")]
    pub output_path: String,

    /// Pages to render, relative to the site root
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_PAGE)]
    pub pages: Vec<String>,

    /// Initially selected team tab (the URL hash in the browser)
    #[arg(long)]
    pub team_category: Option<String>,

    /// TOML configuration file; flags are ignored when given
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Show what would be rendered without fetching anything")]
    pub dry_run: bool,

    #[arg(skip = default_legacy_sections())]
    #[serde(default = "default_legacy_sections")]
    pub legacy_event_sections: Vec<String>,

    #[arg(skip)]
    #[serde(default)]
    pub resources: ResourcePaths,
}

impl ConfigProvider for CliConfig {
    fn source(&self) -> Result<SiteSource> {
        match (&self.base_url, &self.site_root) {
            (Some(url), None) => Ok(SiteSource::Http(url.clone())),
            (None, Some(dir)) => Ok(SiteSource::Directory(dir.clone())),
            (Some(_), Some(_)) => Err(SiteError::ConfigError {
                message: "--base-url and --site-root are mutually exclusive".to_string(),
            }),
            (None, None) => Err(SiteError::MissingConfigError {
                field: "--base-url or --site-root".to_string(),
            }),
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn pages(&self) -> &[String] {
        &self.pages
    }

    fn team_category(&self) -> Option<&str> {
        self.team_category.as_deref()
    }

    fn legacy_event_sections(&self) -> &[String] {
        &self.legacy_event_sections
    }

    fn resources(&self) -> &ResourcePaths {
        &self.resources
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let SiteSource::Http(url) = self.source()? {
            validate_site_origin("base_url", &url)?;
        }
        if let Some(root) = &self.site_root {
            validate_directory("site_root", root)?;
        }
        validate_directory("output_path", &self.output_path)?;
        validate_pages("pages", &self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "site-render",
            "--base-url",
            "http://localhost:8000",
            "--pages",
            "index.html,team.html",
            "--team-category",
            "national-advisory-board",
        ]);

        assert_eq!(config.source().unwrap(), SiteSource::Http("http://localhost:8000".to_string()));
        assert_eq!(config.pages, vec!["index.html", "team.html"]);
        assert_eq!(config.output_path, "./dist");
        assert_eq!(config.legacy_event_sections.len(), 3);
        assert_eq!(config.resources, ResourcePaths::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_is_required() {
        let config = CliConfig::parse_from(["site-render"]);
        assert!(matches!(config.source(), Err(SiteError::MissingConfigError { .. })));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_html_pages() {
        let config = CliConfig::parse_from(["site-render", "--site-root", "./site", "--pages", "data.json"]);
        match config.validate() {
            Err(SiteError::InvalidConfigValueError { field, reason, .. }) => {
                assert_eq!(field, "pages");
                assert!(reason.contains(".json"));
            }
            other => panic!("expected a rejected page, got {:?}", other),
        }
    }
}
