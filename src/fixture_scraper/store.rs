//! Storage boundary contracts and the in-memory implementations backing
//! tests and the file store.
//!
//! The hosted database behind the club site is an external collaborator;
//! the merge engine only ever talks to these traits.

use tokio::sync::Mutex;

use crate::error::AppError;
use crate::fixture_scraper::models::{
    FixtureUpdate, ScrapeLogEntry, ScrapedFixture, StoredFixture,
};

/// Fixture persistence contract. `find_by_teams_and_date` is the natural-key
/// lookup: case-sensitive, exact string equality on all three parts.
pub trait FixtureStore {
    fn find_by_teams_and_date(
        &self,
        home_team: &str,
        away_team: &str,
        date: &str,
    ) -> impl Future<Output = Result<Option<StoredFixture>, AppError>> + Send;

    fn insert(
        &self,
        fixture: &ScrapedFixture,
    ) -> impl Future<Output = Result<StoredFixture, AppError>> + Send;

    fn update(
        &self,
        id: &str,
        changes: &FixtureUpdate,
    ) -> impl Future<Output = Result<StoredFixture, AppError>> + Send;
}

/// Append-only audit log contract. No read path is required by the core.
pub trait ScrapeLogStore {
    fn append(&self, entry: ScrapeLogEntry) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Debug, Default)]
struct FixtureRows {
    next_id: u64,
    rows: Vec<StoredFixture>,
}

/// Mutex-guarded in-memory fixture store. The unit of locking is the whole
/// table, which matches the low-frequency, human-triggered usage pattern.
#[derive(Debug, Default)]
pub struct InMemoryFixtureStore {
    inner: Mutex<FixtureRows>,
}

impl InMemoryFixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows, for tests and the file store's save path.
    pub async fn all(&self) -> Vec<StoredFixture> {
        self.inner.lock().await.rows.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl FixtureStore for InMemoryFixtureStore {
    async fn find_by_teams_and_date(
        &self,
        home_team: &str,
        away_team: &str,
        date: &str,
    ) -> Result<Option<StoredFixture>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .find(|row| row.home_team == home_team && row.away_team == away_team && row.date == date)
            .cloned())
    }

    async fn insert(&self, fixture: &ScrapedFixture) -> Result<StoredFixture, AppError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let stored = StoredFixture {
            id: format!("fx-{}", inner.next_id),
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
        inner.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, changes: &FixtureUpdate) -> Result<StoredFixture, AppError> {
        let mut inner = self.inner.lock().await;
        let row = inner
            .rows
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
        Ok(row.clone())
    }
}

/// Mutex-guarded in-memory scrape log.
#[derive(Debug, Default)]
pub struct InMemoryScrapeLog {
    entries: Mutex<Vec<ScrapeLogEntry>>,
}

impl InMemoryScrapeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ScrapeLogEntry> {
        self.entries.lock().await.clone()
    }
}

impl ScrapeLogStore for InMemoryScrapeLog {
    async fn append(&self, entry: ScrapeLogEntry) -> Result<(), AppError> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture_scraper::models::{ScrapeStatus, Source};

    fn fixture(home: &str, away: &str, date: &str) -> ScrapedFixture {
        ScrapedFixture {
            home_team: home.to_string(),
            away_team: away.to_string(),
            date: date.to_string(),
            time: "15:00".to_string(),
            competition: "Scottish Highland League".to_string(),
            venue: None,
            is_completed: false,
            home_score: None,
            away_score: None,
            source: Source::BbcSport,
            external_id: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryFixtureStore::new();
        let first = store
            .insert(&fixture("Banks o' Dee", "Huntly", "2024-03-30"))
            .await
            .unwrap();
        let second = store
            .insert(&fixture("Keith", "Banks o' Dee", "2024-04-06"))
            .await
            .unwrap();
        assert_eq!(first.id, "fx-1");
        assert_eq!(second.id, "fx-2");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_natural_key_lookup_is_exact() {
        let store = InMemoryFixtureStore::new();
        store
            .insert(&fixture("Banks o' Dee", "Huntly", "2024-03-30"))
            .await
            .unwrap();

        let hit = store
            .find_by_teams_and_date("Banks o' Dee", "Huntly", "2024-03-30")
            .await
            .unwrap();
        assert!(hit.is_some());

        // Case-sensitive, as stored
        let miss = store
            .find_by_teams_and_date("banks o' dee", "Huntly", "2024-03-30")
            .await
            .unwrap();
        assert!(miss.is_none());

        let wrong_date = store
            .find_by_teams_and_date("Banks o' Dee", "Huntly", "2024-04-06")
            .await
            .unwrap();
        assert!(wrong_date.is_none());
    }

    #[tokio::test]
    async fn test_update_touches_mutable_fields_only() {
        let store = InMemoryFixtureStore::new();
        let stored = store
            .insert(&fixture("Banks o' Dee", "Huntly", "2024-03-30"))
            .await
            .unwrap();

        let mut completed = fixture("Banks o' Dee", "Huntly", "2024-03-30");
        completed.is_completed = true;
        completed.home_score = Some(2);
        completed.away_score = Some(1);
        completed.source = Source::Transfermarkt;

        let updated = store
            .update(&stored.id, &FixtureUpdate::from(&completed))
            .await
            .unwrap();

        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.home_team, "Banks o' Dee");
        assert!(updated.is_completed);
        assert_eq!(updated.home_score, Some(2));
        assert_eq!(updated.source, Source::Transfermarkt);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_a_store_error() {
        let store = InMemoryFixtureStore::new();
        let changes = FixtureUpdate::from(&fixture("Banks o' Dee", "Huntly", "2024-03-30"));
        let result = store.update("fx-999", &changes).await;
        assert!(matches!(result, Err(AppError::StoreWrite(_))));
    }

    #[tokio::test]
    async fn test_scrape_log_appends() {
        let log = InMemoryScrapeLog::new();
        log.append(ScrapeLogEntry {
            source: Source::BbcSport,
            status: ScrapeStatus::Success,
            items_found: 1,
            items_added: 1,
            items_updated: 0,
            error_message: None,
            timestamp: "2024-03-30T17:00:00Z".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(log.entries().await.len(), 1);
    }
}
