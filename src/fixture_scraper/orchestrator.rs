//! Top-level scrape pipeline.
//!
//! One invocation is one sequential pass: fetch the source document,
//! extract and filter fixtures, merge them into the store, record one
//! audit entry. Every failure along the way is folded into the returned
//! report; nothing here returns `Err` to the caller.

use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::constants::{self, proxy};
use crate::error::AppError;
use crate::fixture_scraper::adapters::{FetchMode, ScrapeContext, adapter_for};
use crate::fixture_scraper::fetch::{fetch_document, fetch_via_relays};
use crate::fixture_scraper::merge::merge_fixtures;
use crate::fixture_scraper::models::{
    ExtractionReport, ScrapeRunReport, ScrapedFixture, Source,
};
use crate::fixture_scraper::run_log::record_run;
use crate::fixture_scraper::store::{FixtureStore, ScrapeLogStore};

/// Per-invocation settings, resolved by the caller and passed in
/// explicitly. The pipeline reads no ambient configuration.
#[derive(Debug, Clone)]
pub struct ScraperSettings {
    /// Relay chain used for sources that need cross-origin relaying
    pub relay_prefixes: Vec<String>,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            relay_prefixes: proxy::RELAY_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }
}

/// Result of a fetch-and-extract probe ("test connection"): the extracted
/// fixtures without any store interaction.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub source: Source,
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<ScrapedFixture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "htmlSample", skip_serializing_if = "Option::is_none")]
    pub html_sample: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_reasons: Vec<String>,
}

/// Fetches and extracts without storing. The "test connection" path of
/// the admin screen.
#[instrument(skip(client, settings, ctx))]
pub async fn scrape_preview(
    client: &Client,
    settings: &ScraperSettings,
    source: Source,
    url_override: Option<&str>,
    ctx: &ScrapeContext,
) -> PreviewReport {
    match fetch_and_extract(client, settings, source, url_override, ctx).await {
        Ok((extraction, document)) => {
            let html_sample = if extraction.fixtures.is_empty() {
                Some(truncate_sample(&document))
            } else {
                None
            };
            PreviewReport {
                source,
                success: true,
                data: extraction.fixtures,
                error: None,
                html_sample,
                skip_reasons: extraction.skip_reasons,
            }
        }
        Err(e) => PreviewReport {
            source,
            success: false,
            data: Vec::new(),
            error: Some(e.to_string()),
            html_sample: None,
            skip_reasons: Vec::new(),
        },
    }
}

/// Full pipeline: fetch, extract, merge into the store, and append exactly
/// one audit entry whatever the outcome.
#[instrument(skip(client, settings, ctx, fixture_store, log_store))]
pub async fn scrape_and_store<S, L>(
    client: &Client,
    settings: &ScraperSettings,
    source: Source,
    url_override: Option<&str>,
    ctx: &ScrapeContext,
    fixture_store: &S,
    log_store: &L,
) -> ScrapeRunReport
where
    S: FixtureStore,
    L: ScrapeLogStore,
{
    let report = match fetch_and_extract(client, settings, source, url_override, ctx).await {
        Ok((extraction, document)) => {
            if extraction.fixtures.is_empty() {
                info!("{} produced zero fixtures", source);
                let mut report = ScrapeRunReport::warning(source);
                report.html_sample = Some(truncate_sample(&document));
                report.skip_reasons = extraction.skip_reasons;
                report
            } else {
                let found = extraction.fixtures.len();
                let outcome = merge_fixtures(fixture_store, &extraction.fixtures).await;
                info!(
                    "{}: found {}, added {}, updated {}, skipped {}",
                    source, found, outcome.added, outcome.updated, outcome.skipped
                );
                let mut report = ScrapeRunReport::success(source, found, &outcome);
                // Extraction-level skips ride along ahead of merge-level ones
                let mut reasons = extraction.skip_reasons;
                reasons.append(&mut report.skip_reasons);
                report.skip_reasons = reasons;
                report
            }
        }
        Err(e) => {
            warn!("Scrape of {} failed: {e}", source);
            ScrapeRunReport::error(source, e.to_string(), None)
        }
    };

    record_run(log_store, &report).await;
    report
}

/// Shared fetch-and-extract step. Returns the extraction alongside the raw
/// document so callers can attach a diagnostic sample.
async fn fetch_and_extract(
    client: &Client,
    settings: &ScraperSettings,
    source: Source,
    url_override: Option<&str>,
    ctx: &ScrapeContext,
) -> Result<(ExtractionReport, String), AppError> {
    let adapter = adapter_for(source);
    let url = url_override.unwrap_or_else(|| adapter.default_url());

    let document = match adapter.fetch_mode() {
        FetchMode::Direct => fetch_document(client, url).await?,
        FetchMode::Relayed => fetch_via_relays(client, url, &settings.relay_prefixes).await?,
    };

    let extraction = adapter.extract(&document, ctx);
    if extraction.skipped_rows > 0 {
        info!(
            "{}: skipped {} rows during extraction",
            source, extraction.skipped_rows
        );
    }

    Ok((extraction, document))
}

fn truncate_sample(document: &str) -> String {
    document
        .chars()
        .take(constants::HTML_SAMPLE_MAX_CHARS)
        .collect()
}
