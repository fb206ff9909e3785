//! HTML parsing infrastructure for SUUMO listing pages
//!
//! Field location, record normalization and detail page extraction, driven
//! by one configurable rule table keyed by schema revision.

pub mod config;
pub mod context;
pub mod detail_parser;
pub mod error;
pub mod field_locator;
pub mod listing_parser;
pub mod normalizer;

// Re-export public types
pub use config::ParsingConfig;
pub use context::{DetailParseContext, ParseContext};
pub use detail_parser::{DetailParser, PropertyDetails};
pub use error::{ParsingError, ParsingResult};
pub use field_locator::FieldLocator;
pub use listing_parser::{ListingPage, ListingParser};
pub use normalizer::{NormalizedListing, RecordNormalizer};

use scraper::Html;

/// Parser over an already-built document tree with per-page context
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}
