//! Application configuration
//!
//! Every section has serde defaults, so an empty environment yields a working
//! configuration that runs the stock Tokyo query. Values are layered from an
//! optional `config/suumo_scout.{toml,json,yaml}` file and then from
//! `SUUMO_SCOUT__SECTION__KEY` environment variables.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{AssumedAttributes, ValidationCriteria};
use crate::infrastructure::http_client::PageRequest;
use crate::infrastructure::parsing::ParsingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "config/suumo_scout";
pub const ENV_PREFIX: &str = "SUUMO_SCOUT";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub criteria: ValidationCriteria,
    pub assumptions: AssumedAttributes,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
    pub parsing: ParsingConfig,
}

/// One results page to fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub label: String,
    pub params: BTreeMap<String, String>,
}

/// Target site settings shared by the fetcher and URL resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Source tag written on every validated property
    pub name: String,

    /// Origin used to resolve relative and protocol-relative links
    pub base_url: String,

    pub search_url: String,

    pub searches: Vec<SearchQuery>,

    /// Title written into report documents
    pub page_title: String,

    pub user_agent: String,

    /// Extra request headers
    pub headers: BTreeMap<String, String>,

    pub timeout_seconds: u64,

    pub max_requests_per_second: u32,

    /// Fetch each unit's detail page before validation
    pub fetch_details: bool,

    /// Detail pages in flight at once
    pub detail_concurrency: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        // Tokyo 23 wards, mansions, rent cap, 65m² and up, city gas, RC,
        // 2F and up, 10 minutes to station, newest first
        let params = [
            ("ar", "030"),
            ("bs", "040"),
            ("pc", "30"),
            ("po1", "25"),
            ("po2", "99"),
            ("shkr1", "03"),
            ("shkr2", "03"),
            ("shkr3", "03"),
            ("shkr4", "03"),
            ("rn", "0005"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

        Self {
            name: "suumo".to_string(),
            base_url: "https://suumo.jp".to_string(),
            search_url: "https://suumo.jp/jj/chintai/ichiran/FR301FC001/".to_string(),
            searches: vec![SearchQuery {
                label: "tokyo-23-wards".to_string(),
                params,
            }],
            page_title: "SUUMO Property Listings".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            headers: BTreeMap::from([
                ("Accept-Language".to_string(), "ja,en-US;q=0.7,en;q=0.3".to_string()),
            ]),
            timeout_seconds: 30,
            max_requests_per_second: 1,
            fetch_details: false,
            detail_concurrency: 2,
        }
    }
}

impl SiteConfig {
    /// One request per configured search, in configuration order
    pub fn search_requests(&self) -> Vec<PageRequest> {
        self.searches
            .iter()
            .map(|search| PageRequest::new(self.search_url.clone()).with_query(&search.params))
            .collect()
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr, stdout carries the summary)
    pub console_output: bool,

    /// Enable daily rolling file output
    pub file_output: bool,

    pub log_directory: PathBuf,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_directory: PathBuf::from("logs"),
            module_filters: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from `path` (extension optional, file optional)
    /// and environment variables
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.max_requests_per_second == 0 {
            return Err(ConfigError::Validation {
                message: "site.max_requests_per_second must be greater than 0".to_string(),
            });
        }

        if self.site.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "site.timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.site.fetch_details && self.site.detail_concurrency == 0 {
            return Err(ConfigError::Validation {
                message: "site.detail_concurrency must be greater than 0 when fetch_details is enabled"
                    .to_string(),
            });
        }

        if self.site.searches.is_empty() {
            return Err(ConfigError::Validation {
                message: "site.searches must contain at least one query".to_string(),
            });
        }

        if url::Url::parse(&self.site.base_url).is_err() {
            return Err(ConfigError::Validation {
                message: format!("site.base_url is not a valid URL: {}", self.site.base_url),
            });
        }

        if self.parsing.listing.listing_block.is_empty() || self.parsing.listing.title.is_empty() {
            return Err(ConfigError::Validation {
                message: "parsing.listing selectors for blocks and titles cannot be empty".to_string(),
            });
        }

        if self.criteria.min_floor_area < Decimal::ZERO {
            return Err(ConfigError::Validation {
                message: "criteria.min_floor_area cannot be negative".to_string(),
            });
        }

        if self.criteria.max_station_minutes < 0.0 || !self.criteria.max_station_minutes.is_finite() {
            return Err(ConfigError::Validation {
                message: "criteria.max_station_minutes must be a non-negative number".to_string(),
            });
        }

        Ok(())
    }
}

/// Loads the application configuration once at startup
pub struct ConfigManager {
    pub config_path: String,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_FILE.to_string(),
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig::from_file(&self.config_path)?;
        info!(
            "Loaded configuration ({} searches, fetch_details: {})",
            config.site.searches.len(),
            config.site.fetch_details
        );
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
