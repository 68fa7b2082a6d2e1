//! Scrape-run audit logging.
//!
//! Exactly one entry is appended per top-level invocation, whatever the
//! outcome. A failure writing the entry must never mask the outcome being
//! reported, so append errors are swallowed and only surfaced as local
//! diagnostics.

use chrono::Utc;
use tracing::warn;

use crate::fixture_scraper::models::{ScrapeLogEntry, ScrapeRunReport};
use crate::fixture_scraper::store::ScrapeLogStore;

/// Derives the audit entry from a run report and appends it.
pub async fn record_run<L: ScrapeLogStore>(log_store: &L, report: &ScrapeRunReport) {
    let entry = ScrapeLogEntry {
        source: report.source,
        status: report.status,
        items_found: report.items_found,
        items_added: report.items_added,
        items_updated: report.items_updated,
        error_message: report.error.clone(),
        timestamp: Utc::now().to_rfc3339(),
    };

    if let Err(e) = log_store.append(entry).await {
        warn!(
            "Failed to append scrape log entry for {}: {e}",
            report.source
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::fixture_scraper::models::{MergeOutcome, ScrapeStatus, Source};
    use crate::fixture_scraper::store::InMemoryScrapeLog;

    #[tokio::test]
    async fn test_success_run_is_recorded() {
        let log = InMemoryScrapeLog::new();
        let outcome = MergeOutcome {
            added: 2,
            updated: 1,
            skipped: 0,
            skip_reasons: Vec::new(),
        };
        record_run(&log, &ScrapeRunReport::success(Source::BbcSport, 3, &outcome)).await;

        let entries = log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, ScrapeStatus::Success);
        assert_eq!(entries[0].items_found, 3);
        assert_eq!(entries[0].items_added, 2);
        assert_eq!(entries[0].items_updated, 1);
        assert!(entries[0].error_message.is_none());
        assert!(!entries[0].timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_error_run_carries_message() {
        let log = InMemoryScrapeLog::new();
        record_run(
            &log,
            &ScrapeRunReport::error(Source::Transfermarkt, "all proxies failed", None),
        )
        .await;

        let entries = log.entries().await;
        assert_eq!(entries[0].status, ScrapeStatus::Error);
        assert_eq!(entries[0].items_found, 0);
        assert_eq!(
            entries[0].error_message.as_deref(),
            Some("all proxies failed")
        );
    }

    struct FailingLog;

    impl ScrapeLogStore for FailingLog {
        async fn append(&self, _entry: ScrapeLogEntry) -> Result<(), AppError> {
            Err(AppError::store_write("log table unavailable"))
        }
    }

    #[tokio::test]
    async fn test_append_failure_is_swallowed() {
        // Must not panic or propagate
        record_run(&FailingLog, &ScrapeRunReport::warning(Source::RssFeed)).await;
    }
}
