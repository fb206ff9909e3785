//! Scrape pipeline: fetch → locate → normalize → (enrich) → validate
//!
//! Search pages are fetched concurrently; every later stage runs on the
//! collected markup in request order. Results are sorted by a stable key so
//! the output does not depend on completion order.

use std::collections::{BTreeMap, HashSet};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::application::projection::{DetailIndex, PropertyProjector};
use crate::application::validation::{PropertyCandidate, ValidationFilter};
use crate::domain::{Building, Unit, ValidatedProperty};
use crate::infrastructure::config::{AppConfig, SiteConfig};
use crate::infrastructure::http_client::{FetchError, PageFetcher, PageRequest};
use crate::infrastructure::parsing::{
    DetailParseContext, DetailParser, ListingPage, ListingParser, NormalizedListing, ParseContext, ParsingError,
    ParsingResult,
};

/// Stage at which a page dropped out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Fetch,
    Parse,
}

/// One page that contributed nothing to the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub url: String,
    pub stage: FailureStage,
    pub status: Option<u16>,
    pub message: String,
}

impl PageFailure {
    fn fetch(url: String, error: &FetchError) -> Self {
        Self {
            url,
            stage: FailureStage::Fetch,
            status: error.status(),
            message: error.to_string(),
        }
    }

    fn parse(url: String, error: &ParsingError) -> Self {
        Self {
            url,
            stage: FailureStage::Parse,
            status: None,
            message: error.to_string(),
        }
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub pages_requested: usize,
    pub pages_fetched: usize,
    pub buildings: usize,
    pub units: usize,
    pub skipped_blocks: usize,
    pub skipped_unit_rows: usize,
    pub detail_pages_fetched: usize,
    pub detail_failures: usize,
    pub properties: usize,
    /// Rejected units by reason key
    pub rejections: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub buildings: Vec<Building>,
    pub properties: Vec<ValidatedProperty>,
    pub stats: RunStats,
    pub failures: Vec<PageFailure>,
}

impl RunOutcome {
    /// Every search page failed to fetch
    pub fn all_fetches_failed(&self) -> bool {
        self.stats.pages_requested > 0 && self.stats.pages_fetched == 0
    }
}

pub struct ScrapePipeline<F: PageFetcher> {
    fetcher: F,
    site: SiteConfig,
    base_url: Url,
    listing_parser: ListingParser,
    detail_parser: DetailParser,
    projector: PropertyProjector,
    filter: ValidationFilter,
}

impl<F: PageFetcher> ScrapePipeline<F> {
    pub fn new(fetcher: F, config: &AppConfig) -> ParsingResult<Self> {
        let base_url = Url::parse(&config.site.base_url).map_err(|e| ParsingError::UrlResolutionFailed {
            url: config.site.base_url.clone(),
            reason: format!("Invalid base URL: {e}"),
            base_url: None,
        })?;

        Ok(Self {
            fetcher,
            site: config.site.clone(),
            base_url,
            listing_parser: ListingParser::with_config(&config.parsing)?,
            detail_parser: DetailParser::with_config(&config.parsing)?,
            projector: PropertyProjector::new(config.site.name.clone(), config.assumptions.clone()),
            filter: ValidationFilter::new(config.criteria.clone()),
        })
    }

    /// Run every configured search
    pub async fn run(&self) -> RunOutcome {
        let labels: Vec<&str> = self.site.searches.iter().map(|search| search.label.as_str()).collect();
        info!(searches = %labels.join(", "), "Starting scrape run");
        self.run_requests(self.site.search_requests()).await
    }

    pub async fn run_requests(&self, requests: Vec<PageRequest>) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        outcome.stats.pages_requested = requests.len();
        info!("Fetching {} search pages", requests.len());

        let pages = futures::future::join_all(requests.iter().map(|request| async move {
            (request.full_url(), self.fetcher.fetch(request).await)
        }))
        .await;

        let mut listings: Vec<NormalizedListing> = Vec::new();
        for (url, result) in pages {
            let markup = match result {
                Ok(markup) => markup,
                Err(e) => {
                    error!(url = %url, error = %e, "Failed to fetch search page");
                    outcome.failures.push(PageFailure::fetch(url, &e));
                    continue;
                }
            };
            outcome.stats.pages_fetched += 1;

            match self.parse_listing_page(&url, &markup) {
                Ok(page) => {
                    outcome.stats.skipped_blocks += page.skipped_blocks;
                    outcome.stats.skipped_unit_rows += page.skipped_unit_rows();
                    listings.extend(page.listings);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Search page yielded no listings");
                    outcome.failures.push(PageFailure::parse(url, &e));
                }
            }
        }

        let details = if self.site.fetch_details {
            self.fetch_details(&listings, &mut outcome.stats).await
        } else {
            DetailIndex::new()
        };

        for listing in &listings {
            let projection = self.projector.project_listing(listing, &details, &self.filter);
            for rejection in &projection.rejections {
                debug!(building = %listing.building.title, reason = %rejection, "Unit rejected");
                *outcome.stats.rejections.entry(rejection.reason()).or_default() += 1;
            }
            outcome.properties.extend(projection.properties);
        }

        outcome.buildings = listings.into_iter().map(|listing| listing.building).collect();
        sort_buildings(&mut outcome.buildings);
        sort_properties(&mut outcome.properties);

        outcome.stats.buildings = outcome.buildings.len();
        outcome.stats.units = outcome.buildings.iter().map(|building| building.units.len()).sum();
        outcome.stats.properties = outcome.properties.len();

        info!(
            "Run finished: {} buildings, {} units, {} properties, {} failed pages",
            outcome.stats.buildings,
            outcome.stats.units,
            outcome.stats.properties,
            outcome.failures.len()
        );

        outcome
    }

    fn parse_listing_page(&self, url: &str, markup: &str) -> ParsingResult<ListingPage> {
        let context = ParseContext {
            page_url: url.to_string(),
            base_url: self.base_url.clone(),
        };
        self.listing_parser.parse_page(markup, &context)
    }

    /// Fetch detail pages for units that already pass the numeric checks
    async fn fetch_details(&self, listings: &[NormalizedListing], stats: &mut RunStats) -> DetailIndex {
        let mut seen = HashSet::new();
        let urls: Vec<String> = listings
            .iter()
            .flat_map(|listing| {
                listing
                    .building
                    .units
                    .iter()
                    .filter(|unit| self.worth_enriching(listing, unit))
                    .filter_map(|unit| unit.url.clone())
            })
            .filter(|url| seen.insert(url.clone()))
            .collect();

        info!("Fetching {} detail pages", urls.len());

        let results: Vec<(String, Result<String, FetchError>)> = stream::iter(urls)
            .map(|url| async move {
                let result = self.fetcher.fetch(&PageRequest::new(url.clone())).await;
                (url, result)
            })
            .buffered(self.site.detail_concurrency.max(1))
            .collect()
            .await;

        let mut details = DetailIndex::new();
        for (url, result) in results {
            let parsed = match result {
                Ok(markup) => {
                    let context = DetailParseContext::new(url.clone(), self.base_url.clone());
                    self.detail_parser.parse_page(&markup, &context).map_err(|e| e.to_string())
                }
                Err(e) => Err(e.to_string()),
            };

            match parsed {
                Ok(page) => {
                    stats.detail_pages_fetched += 1;
                    details.insert(url, page);
                }
                Err(message) => {
                    warn!(url = %url, error = %message, "Detail page skipped");
                    stats.detail_failures += 1;
                }
            }
        }

        details
    }

    fn worth_enriching(&self, listing: &NormalizedListing, unit: &Unit) -> bool {
        let (candidate, _) = self.projector.candidate(listing, unit, None);
        let criteria = self.filter.criteria();
        let numeric_only = PropertyCandidate {
            building_material: Some(criteria.required_material.clone()),
            gas_type: Some(criteria.required_gas_type.clone()),
            ..candidate
        };
        self.filter.validate(&numeric_only)
    }
}

/// Lowest rent first, buildings without any rent last, then by title
pub fn sort_buildings(buildings: &mut [Building]) {
    buildings.sort_by(|a, b| {
        let (rent_a, rent_b) = (a.lowest_rent(), b.lowest_rent());
        rent_a
            .is_none()
            .cmp(&rent_b.is_none())
            .then(rent_a.cmp(&rent_b))
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Cheapest first, then by URL
pub fn sort_properties(properties: &mut [ValidatedProperty]) {
    properties.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.url.cmp(&b.url)));
}
