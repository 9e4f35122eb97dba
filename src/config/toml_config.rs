use crate::config::{default_legacy_sections, ResourcePaths, DEFAULT_PAGE};
use crate::domain::ports::{ConfigProvider, SiteSource};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_directory, validate_pages, validate_resource_path, validate_site_origin, Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub resources: ResourcePaths,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub root_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
    pub team_category: Option<String>,
    #[serde(default = "default_legacy_sections")]
    pub legacy_event_sections: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            team_category: None,
            legacy_event_sections: default_legacy_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_pages() -> Vec<String> {
    vec![DEFAULT_PAGE.to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SiteError::IoError {
            resource: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_ORIGIN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> Result<SiteSource> {
        match (&self.source.base_url, &self.source.root_dir) {
            (Some(url), None) => Ok(SiteSource::Http(url.clone())),
            (None, Some(dir)) => Ok(SiteSource::Directory(dir.clone())),
            (Some(_), Some(_)) => Err(SiteError::ConfigError {
                message: "source.base_url and source.root_dir are mutually exclusive".to_string(),
            }),
            (None, None) => Err(SiteError::MissingConfigError {
                field: "source.base_url or source.root_dir".to_string(),
            }),
        }
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn pages(&self) -> &[String] {
        &self.render.pages
    }

    fn team_category(&self) -> Option<&str> {
        self.render.team_category.as_deref()
    }

    fn legacy_event_sections(&self) -> &[String] {
        &self.render.legacy_event_sections
    }

    fn resources(&self) -> &ResourcePaths {
        &self.resources
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.source()? {
            SiteSource::Http(url) => validate_site_origin("source.base_url", &url)?,
            SiteSource::Directory(dir) => validate_directory("source.root_dir", &dir)?,
        }

        validate_directory("output.path", &self.output.path)?;
        validate_pages("render.pages", &self.render.pages)?;

        for (field, value) in self.resources.all() {
            validate_resource_path(field, value)?;
        }

        Ok(())
    }
}
