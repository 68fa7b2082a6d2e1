//! Fixture acquisition: source adapters, text normalizers, fetch/relay
//! layer, merge engine and run logging.

pub mod adapters;
pub mod fetch;
pub mod json_store;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod run_log;
pub mod store;

pub use adapters::{ScrapeContext, SourceAdapter, adapter_for};
pub use merge::merge_fixtures;
pub use models::{
    ExtractionReport, MergeOutcome, ScrapeLogEntry, ScrapeRunReport, ScrapeStatus, ScrapedFixture,
    Source, StoredFixture,
};
pub use orchestrator::{PreviewReport, ScraperSettings, scrape_and_store, scrape_preview};
pub use store::{FixtureStore, ScrapeLogStore};
