//! Listing page parser
//!
//! Walks every listing block of a search results page, locates and
//! normalizes it. One malformed block never aborts the page: it is skipped
//! with a warning and counted.

use scraper::Html;
use tracing::{debug, warn};

use super::config::ParsingConfig;
use super::field_locator::FieldLocator;
use super::normalizer::{NormalizedListing, RecordNormalizer};
use super::{ContextualParser, ParseContext, ParsingError, ParsingResult};

/// Everything extracted from one results page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    pub listings: Vec<NormalizedListing>,
    pub skipped_blocks: usize,
}

impl ListingPage {
    pub fn skipped_unit_rows(&self) -> usize {
        self.listings
            .iter()
            .map(|listing| listing.building.skipped_unit_rows)
            .sum()
    }
}

/// Parser for SUUMO search results pages
pub struct ListingParser {
    locator: FieldLocator,
}

impl ListingParser {
    /// Create a new listing parser with the default rule table
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    /// Create parser with a custom rule table
    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        Ok(Self {
            locator: FieldLocator::with_config(config)?,
        })
    }

    /// Parse raw markup of one results page
    pub fn parse_page(&self, markup: &str, context: &ParseContext) -> ParsingResult<ListingPage> {
        let html = Html::parse_document(markup);
        self.parse_with_context(&html, context)
    }
}

impl ContextualParser for ListingParser {
    type Output = ListingPage;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing listing page {}", context.page_url);

        let (blocks, tried_selectors) = self.locator.listing_blocks(html.root_element());
        if blocks.is_empty() {
            return Err(ParsingError::no_listings_found(&context.page_url, tried_selectors));
        }

        let mut page = ListingPage::default();
        for (index, block) in blocks.into_iter().enumerate() {
            match self.locator.locate_block(block) {
                Ok(located) => {
                    page.listings.push(RecordNormalizer::normalize(located, context));
                }
                Err(e) => {
                    warn!(
                        page = %context.page_url,
                        index,
                        error = %e,
                        "Skipping listing block"
                    );
                    page.skipped_blocks += 1;
                }
            }
        }

        debug!(
            "Extracted {} buildings from {} ({} blocks skipped)",
            page.listings.len(),
            context.page_url,
            page.skipped_blocks
        );

        Ok(page)
    }
}
