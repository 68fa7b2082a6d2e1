//! Banks o' Dee FC Fixture Scraping Library
//!
//! This library fetches fixtures and results for Banks o' Dee FC from
//! third-party sources (BBC Sport, the Highland Football League site, an
//! RSS feed, Transfermarkt), normalizes their inconsistently-formatted
//! date/score/team text into a common fixture shape, and upserts the
//! results into a fixture store keyed on `(homeTeam, awayTeam, date)`.
//! Every run appends one audit entry, whatever its outcome.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dee_fixtures::fixture_scraper::adapters::ScrapeContext;
//! use dee_fixtures::fixture_scraper::fetch::create_http_client_with_timeout;
//! use dee_fixtures::fixture_scraper::store::{InMemoryFixtureStore, InMemoryScrapeLog};
//! use dee_fixtures::fixture_scraper::{ScraperSettings, Source, scrape_and_store};
//! use dee_fixtures::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let client = create_http_client_with_timeout(30)?;
//!     let settings = ScraperSettings::default();
//!     let fixtures = InMemoryFixtureStore::new();
//!     let log = InMemoryScrapeLog::new();
//!
//!     let report = scrape_and_store(
//!         &client,
//!         &settings,
//!         Source::BbcSport,
//!         None,
//!         &ScrapeContext::now(),
//!         &fixtures,
//!         &log,
//!     )
//!     .await;
//!
//!     println!(
//!         "{}: found {}, added {}, updated {}",
//!         report.status, report.items_found, report.items_added, report.items_updated
//!     );
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture_scraper;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use fixture_scraper::{
    PreviewReport, ScrapeLogEntry, ScrapeRunReport, ScrapeStatus, ScrapedFixture, ScraperSettings,
    Source, StoredFixture, scrape_and_store, scrape_preview,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
