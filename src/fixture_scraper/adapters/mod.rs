//! Source adapters: one strategy per upstream source.
//!
//! Each adapter owns the brittle, source-specific knowledge - which markup
//! fragments hold fixtures and how their text is shaped - and maps them
//! through the shared normalizers into [`ScrapedFixture`] records. Swapping
//! or versioning a source's parsing rules stays inside its adapter; the
//! merge engine and run logger never see markup.

pub mod bbc;
pub mod highland;
pub mod rss;
pub mod transfermarkt;

use chrono::{Local, NaiveDate};
use scraper::ElementRef;

use crate::fixture_scraper::models::{ExtractionReport, Source};

pub use bbc::BbcSportAdapter;
pub use highland::HighlandLeagueAdapter;
pub use rss::RssFeedAdapter;
pub use transfermarkt::TransfermarktAdapter;

/// How a source's document must be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Plain GET straight at the source
    Direct,
    /// Source blocks cross-origin-style clients; go through the relay chain
    Relayed,
}

/// Per-invocation context passed to adapters. Everything an adapter needs
/// beyond the document itself is injected here rather than read from
/// ambient state, so runs share no mutable state and relative dates stay
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    /// Date that relative keywords (today/yesterday/tomorrow) resolve
    /// against
    pub today: NaiveDate,
}

impl ScrapeContext {
    pub fn now() -> Self {
        ScrapeContext {
            today: Local::now().date_naive(),
        }
    }

    pub fn on(today: NaiveDate) -> Self {
        ScrapeContext { today }
    }
}

impl Default for ScrapeContext {
    fn default() -> Self {
        Self::now()
    }
}

/// Common adapter contract: identify the source, say how to fetch its
/// document, and extract fixtures from it. Extraction is synchronous and
/// pure so every adapter is unit-testable against canned documents.
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Document URL used when the caller does not override it
    fn default_url(&self) -> &'static str;

    fn fetch_mode(&self) -> FetchMode;

    /// Extracts tracked-club fixtures from a raw document. Row-level
    /// failures are recorded as skips, never errors; an unusable document
    /// simply yields zero fixtures.
    fn extract(&self, document: &str, ctx: &ScrapeContext) -> ExtractionReport;
}

/// Collapsed, whitespace-normalized text content of an element.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strategy lookup for a source tag.
pub fn adapter_for(source: Source) -> &'static dyn SourceAdapter {
    match source {
        Source::BbcSport => &BbcSportAdapter,
        Source::HighlandFootballLeague => &HighlandLeagueAdapter,
        Source::RssFeed => &RssFeedAdapter,
        Source::Transfermarkt => &TransfermarktAdapter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_lookup_round_trips_source() {
        for source in Source::ALL {
            assert_eq!(adapter_for(source).source(), source);
        }
    }

    #[test]
    fn test_every_adapter_has_a_default_url() {
        for source in Source::ALL {
            let url = adapter_for(source).default_url();
            assert!(url.starts_with("http"), "default URL for {source}: {url}");
        }
    }
}
