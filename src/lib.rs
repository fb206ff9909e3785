//! suumo-scout - SUUMO rental listing scraper
//!
//! Fetches search results pages, extracts buildings and their units from the
//! class-tagged listing markup, filters units against habitability criteria
//! and renders the results as JSON, Markdown and HTML reports.

pub mod application;
pub mod domain;
pub mod infrastructure;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::application::reporting::{self, ReportMeta};
use crate::application::{RunOutcome, ScrapePipeline};
use crate::infrastructure::{AppConfig, HttpClient, HttpClientConfig, OutputWriter};

/// Run one scrape with the given configuration and print the summary
pub async fn run(config: AppConfig) -> Result<RunOutcome> {
    let client = HttpClient::new(HttpClientConfig::from_site(&config.site))?;
    let pipeline = ScrapePipeline::new(client, &config).context("Failed to build listing parsers")?;

    let outcome = pipeline.run().await;

    if outcome.all_fetches_failed() {
        let reason = outcome
            .failures
            .first()
            .map_or_else(|| "no pages fetched".to_string(), |failure| failure.message.clone());
        error!("Every search page failed to fetch");
        return Err(anyhow!("Error scraping SUUMO: {reason}"));
    }

    for failure in &outcome.failures {
        warn!(url = %failure.url, stage = ?failure.stage, "Page contributed no listings: {}", failure.message);
    }

    let meta = ReportMeta::new(config.site.page_title.clone(), Utc::now());
    let writer = OutputWriter::new(&config.output.directory);
    let written = reporting::write_reports(&writer, &meta, &outcome.buildings, &outcome.properties)
        .await
        .context("Failed to write reports")?;

    info!(
        "Reports written to {} (rejections: {:?})",
        writer.directory().display(),
        outcome.stats.rejections
    );

    print!(
        "{}",
        reporting::summary::render(&outcome.properties, Some(&written.results.display().to_string()))
    );

    Ok(outcome)
}
