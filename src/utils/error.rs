use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Request for {resource} failed: {source}")]
    TransportError {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not read {resource}: {source}")]
    IoError {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error loading {resource}! status: {status}")]
    HttpStatusError { resource: String, status: u16 },

    #[error("Failed to parse {resource}: {message}")]
    ParseError { resource: String, message: String },

    #[error("Unknown category: {key}")]
    UnknownKeyError { key: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn parse(resource: impl Into<String>, message: impl ToString) -> Self {
        SiteError::ParseError {
            resource: resource.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::TransportError { .. } | SiteError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            SiteError::ParseError { .. } | SiteError::UnknownKeyError { .. } => ErrorCategory::Data,
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::ValidationError { .. } => ErrorCategory::Configuration,
            SiteError::IoError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端暫時性錯誤，重新執行可能成功
            SiteError::TransportError { .. } => ErrorSeverity::Medium,
            SiteError::HttpStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            SiteError::HttpStatusError { .. }
            | SiteError::ParseError { .. }
            | SiteError::UnknownKeyError { .. } => ErrorSeverity::High,
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::ValidationError { .. } => ErrorSeverity::High,
            SiteError::IoError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::TransportError { resource, .. } => format!(
                "Check that the site origin is reachable and serving {}",
                resource
            ),
            SiteError::HttpStatusError { resource, status } => match status {
                404 => format!("Make sure {} exists under the site root", resource),
                _ => format!("The server rejected {}; retry once it is healthy", resource),
            },
            SiteError::ParseError { resource, .. } => {
                format!("Fix the markup or JSON in {}", resource)
            }
            SiteError::UnknownKeyError { .. } => {
                "Use one of: core-team, practitioner-advisory-board, national-advisory-board, tutoring-providers"
                    .to_string()
            }
            SiteError::IoError { resource, .. } => {
                format!("Check file permissions and that {} exists", resource)
            }
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::ValidationError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not load a site resource: {}", self),
            ErrorCategory::Data => format!("Site data is invalid: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
