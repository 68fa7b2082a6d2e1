//! JSON-file persistence for fixtures and the scrape log.
//!
//! The production site keeps fixtures in its hosted database; that client
//! is outside this crate. The binary still needs a working store, so this
//! wraps the same contracts around a single JSON document on disk. Every
//! mutation rewrites the file; volumes here are dozens of rows, not
//! thousands.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::fixture_scraper::models::{
    FixtureUpdate, ScrapeLogEntry, ScrapedFixture, StoredFixture,
};
use crate::fixture_scraper::store::{FixtureStore, ScrapeLogStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    fixtures: Vec<StoredFixture>,
    #[serde(default)]
    scrape_log: Vec<ScrapeLogEntry>,
}

/// File-backed store implementing both storage contracts.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<StoreFile>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating an empty one in memory when the
    /// file does not exist yet (it is written on first mutation).
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let state = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            serde_json::from_str(&content)?
        } else {
            StoreFile::default()
        };
        Ok(JsonFileStore {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn fixtures(&self) -> Vec<StoredFixture> {
        self.state.lock().await.fixtures.clone()
    }

    pub async fn log_entries(&self) -> Vec<ScrapeLogEntry> {
        self.state.lock().await.scrape_log.clone()
    }

    async fn persist(&self, state: &StoreFile) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(state)?;
        let mut file = fs::File::create(&self.path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

impl FixtureStore for JsonFileStore {
    async fn find_by_teams_and_date(
        &self,
        home_team: &str,
        away_team: &str,
        date: &str,
    ) -> Result<Option<StoredFixture>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .fixtures
            .iter()
            .find(|row| row.home_team == home_team && row.away_team == away_team && row.date == date)
            .cloned())
    }

    async fn insert(&self, fixture: &ScrapedFixture) -> Result<StoredFixture, AppError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let stored = StoredFixture {
            id: format!("fx-{}", state.next_id),
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            date: fixture.date.clone(),
            time: fixture.time.clone(),
            competition: fixture.competition.clone(),
            venue: fixture.venue.clone(),
            is_completed: fixture.is_completed,
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            source: fixture.source,
            external_id: fixture.external_id.clone(),
        };
        state.fixtures.push(stored.clone());
        self.persist(&state).await?;
        Ok(stored)
    }

    async fn update(&self, id: &str, changes: &FixtureUpdate) -> Result<StoredFixture, AppError> {
        let mut state = self.state.lock().await;
        let row = state
            .fixtures
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::store_write(format!("no fixture with id '{id}'")))?;

        row.competition = changes.competition.clone();
        row.time = changes.time.clone();
        row.venue = changes.venue.clone();
        row.is_completed = changes.is_completed;
        row.home_score = changes.home_score;
        row.away_score = changes.away_score;
        row.source = changes.source;
        let updated = row.clone();
        self.persist(&state).await?;
        Ok(updated)
    }
}

impl ScrapeLogStore for JsonFileStore {
    async fn append(&self, entry: ScrapeLogEntry) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.scrape_log.push(entry);
        self.persist(&state).await
    }
}
