//! Infrastructure layer for configuration, HTTP fetching, parsing and output
//!
//! Everything here talks to the outside world (network, filesystem,
//! environment) or to markup; the application layer only sees the types
//! re-exported below.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod report_writer;

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, ConfigManager, LoggingConfig, OutputConfig, SearchQuery, SiteConfig};
pub use http_client::{FetchError, HttpClient, HttpClientConfig, PageFetcher, PageRequest};
pub use logging::init_logging_with_config;
pub use parsing::{
    ContextualParser, DetailParseContext, DetailParser, ListingPage, ListingParser, ParseContext, ParsingConfig,
    ParsingError, ParsingResult, PropertyDetails,
};
pub use report_writer::{OutputWriter, ReportError};
