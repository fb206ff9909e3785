//! Property detail page parser
//!
//! Extracts the fields the results page does not carry: free-text
//! description, main photo, facing direction and posting date, plus the
//! construction and gas lines of the overview table so material and gas type
//! can be observed instead of assumed.

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::{DetailPageSelectors, ParsingConfig, TermMapping};
use super::context::DetailParseContext;
use super::field_locator::{element_text, first_text, match_terms};
use super::{ContextualParser, ParsingError, ParsingResult};

/// Fields extracted from one detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDetails {
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub direction: Option<String>,
    pub posted_date: Option<String>,
    pub building_material: Option<String>,
    pub gas_type: Option<String>,
}

/// Parser for SUUMO property detail pages
pub struct DetailParser {
    description_selectors: Vec<Selector>,
    image_selectors: Vec<Selector>,
    info_row_selectors: Vec<Selector>,
    label_selector: Selector,
    value_selector: Selector,
    labels: DetailPageSelectors,
    material_terms: Vec<TermMapping>,
    gas_terms: Vec<TermMapping>,
}

impl DetailParser {
    /// Create a new detail parser with default configuration
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        let selectors = &config.detail_page;
        Ok(Self {
            description_selectors: Self::compile_selectors(&selectors.description)?,
            image_selectors: Self::compile_selectors(&selectors.image)?,
            info_row_selectors: Self::compile_selectors(&selectors.info_row)?,
            label_selector: Self::compile_one("th")?,
            value_selector: Self::compile_one("td")?,
            labels: selectors.clone(),
            material_terms: config.material_terms.clone(),
            gas_terms: config.gas_terms.clone(),
        })
    }

    pub fn parse_page(&self, markup: &str, context: &DetailParseContext) -> ParsingResult<PropertyDetails> {
        let html = Html::parse_document(markup);
        self.parse_with_context(&html, context)
    }

    fn compile_one(selector: &str) -> ParsingResult<Selector> {
        Selector::parse(selector).map_err(|e| ParsingError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn compile_selectors(selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
        selector_strings
            .iter()
            .map(|selector| Self::compile_one(selector))
            .collect()
    }

    /// Label/value pairs from `th`/`td` rows; a row may hold several pairs
    fn extract_info_table(&self, html: &Html) -> IndexMap<String, String> {
        let mut info = IndexMap::new();
        for selector in &self.info_row_selectors {
            for row in html.select(selector) {
                let labels: Vec<ElementRef<'_>> = row.select(&self.label_selector).collect();
                let values: Vec<ElementRef<'_>> = row.select(&self.value_selector).collect();
                for (label, value) in labels.iter().zip(&values) {
                    let label = element_text(*label).trim().to_string();
                    let value = element_text(*value)
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ");
                    if !label.is_empty() && !value.is_empty() && value != "-" {
                        info.entry(label).or_insert(value);
                    }
                }
            }
        }
        info
    }

    fn extract_image(&self, html: &Html, context: &DetailParseContext) -> Option<String> {
        let listing_context = context.listing_context();
        self.image_selectors.iter().find_map(|selector| {
            html.select(selector).find_map(|image| {
                ["rel", "data-src", "src"]
                    .iter()
                    .filter_map(|attribute| image.value().attr(attribute))
                    .find(|src| !src.trim().is_empty() && !src.starts_with("data:"))
                    .and_then(|src| listing_context.resolve_url(src).ok())
            })
        })
    }
}

impl ContextualParser for DetailParser {
    type Output = PropertyDetails;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing detail page {}", context.url);

        let info = self.extract_info_table(html);
        let root = html.root_element();

        let details = PropertyDetails {
            description: first_text(root, &self.description_selectors),
            image_url: self.extract_image(html, context),
            direction: info.get(&self.labels.direction_label).cloned(),
            posted_date: info.get(&self.labels.posted_date_label).cloned(),
            building_material: info
                .get(&self.labels.structure_label)
                .and_then(|structure| match_terms(std::iter::once(structure), &self.material_terms)),
            gas_type: match_terms(info.values(), &self.gas_terms),
        };

        debug!(
            "Detail page {} yielded {} table rows (direction: {:?})",
            context.url,
            info.len(),
            details.direction
        );

        Ok(details)
    }
}
