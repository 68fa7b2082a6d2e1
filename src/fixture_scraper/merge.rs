//! Insert-or-update of scraped fixtures against the store.
//!
//! Identity is the natural key `(homeTeam, awayTeam, date)` - time and
//! competition are not part of it, so a league match and a cup replay
//! between the same pair on the same day resolve to one row and the later
//! sighting's mutable fields win. That matches the upstream sources, none
//! of which disambiguate the case.

use tracing::{debug, warn};

use crate::fixture_scraper::models::{FixtureUpdate, MergeOutcome, ScrapedFixture};
use crate::fixture_scraper::store::FixtureStore;

/// Merges a batch of scraped fixtures into the store, in input order.
///
/// Each fixture is looked up by its natural key; a hit updates the mutable
/// fields (score, completion, time, venue, competition, source), a miss
/// inserts a new row. The batch is not transactional: a fixture whose
/// store call fails is counted as skipped and the rest of the batch
/// continues. This function itself never fails.
pub async fn merge_fixtures<S: FixtureStore>(
    store: &S,
    fixtures: &[ScrapedFixture],
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for fixture in fixtures {
        let (home, away, date) = fixture.natural_key();

        let existing = match store.find_by_teams_and_date(home, away, date).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!("Lookup failed for {home} v {away} on {date}: {e}");
                outcome.skipped += 1;
                outcome
                    .skip_reasons
                    .push(format!("{home} v {away} {date}: lookup failed: {e}"));
                continue;
            }
        };

        match existing {
            Some(stored) => match store.update(&stored.id, &FixtureUpdate::from(fixture)).await {
                Ok(_) => {
                    debug!("Updated fixture {} ({home} v {away} {date})", stored.id);
                    outcome.updated += 1;
                }
                Err(e) => {
                    warn!("Update failed for fixture {}: {e}", stored.id);
                    outcome.skipped += 1;
                    outcome
                        .skip_reasons
                        .push(format!("{home} v {away} {date}: update failed: {e}"));
                }
            },
            None => match store.insert(fixture).await {
                Ok(stored) => {
                    debug!("Inserted fixture {} ({home} v {away} {date})", stored.id);
                    outcome.added += 1;
                }
                Err(e) => {
                    warn!("Insert failed for {home} v {away} on {date}: {e}");
                    outcome.skipped += 1;
                    outcome
                        .skip_reasons
                        .push(format!("{home} v {away} {date}: insert failed: {e}"));
                }
            },
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::fixture_scraper::models::{Source, StoredFixture};
    use crate::fixture_scraper::store::InMemoryFixtureStore;

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

    fn batch() -> Vec<ScrapedFixture> {
        vec![
            fixture("Banks o' Dee", "Formartine United", "2024-03-30"),
            fixture("Brechin City", "Banks o' Dee", "2024-04-06"),
            fixture("Banks o' Dee", "Buckie Thistle", "2024-04-13"),
        ]
    }

    #[tokio::test]
    async fn test_merge_is_idempotent_on_the_natural_key() {
        let store = InMemoryFixtureStore::new();
        let fixtures = batch();

        let first = merge_fixtures(&store, &fixtures).await;
        assert_eq!(first.added, 3);
        assert_eq!(first.updated, 0);
        assert_eq!(first.skipped, 0);

        let second = merge_fixtures(&store, &fixtures).await;
        assert_eq!(second.added, 0);
        assert_eq!(second.updated, 3);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_update_path_applies_new_scores() {
        let store = InMemoryFixtureStore::new();
        merge_fixtures(&store, &batch()).await;

        let mut completed = fixture("Banks o' Dee", "Formartine United", "2024-03-30");
        completed.is_completed = true;
        completed.home_score = Some(2);
        completed.away_score = Some(1);
        completed.source = Source::Transfermarkt;

        let outcome = merge_fixtures(&store, &[completed]).await;
        assert_eq!(outcome.updated, 1);

        let stored = store
            .find_by_teams_and_date("Banks o' Dee", "Formartine United", "2024-03-30")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.home_score, Some(2));
        assert_eq!(stored.away_score, Some(1));
        assert_eq!(stored.source, Source::Transfermarkt);
    }

    #[tokio::test]
    async fn test_same_batch_duplicates_resolve_later_wins() {
        let store = InMemoryFixtureStore::new();

        let mut early = fixture("Banks o' Dee", "Keith", "2024-04-20");
        early.time = "15:00".to_string();
        let mut late = fixture("Banks o' Dee", "Keith", "2024-04-20");
        late.time = "19:45".to_string();

        let outcome = merge_fixtures(&store, &[early, late]).await;
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.updated, 1);

        let stored = store
            .find_by_teams_and_date("Banks o' Dee", "Keith", "2024-04-20")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.time, "19:45");
    }

    /// Store that rejects inserts for one away team, for failure-isolation
    /// coverage.
    struct RejectingStore {
        inner: InMemoryFixtureStore,
        reject_away: String,
    }

    impl FixtureStore for RejectingStore {
        async fn find_by_teams_and_date(
            &self,
            home_team: &str,
            away_team: &str,
            date: &str,
        ) -> Result<Option<StoredFixture>, AppError> {
            self.inner
                .find_by_teams_and_date(home_team, away_team, date)
                .await
        }

        async fn insert(&self, fixture: &ScrapedFixture) -> Result<StoredFixture, AppError> {
            if fixture.away_team == self.reject_away {
                return Err(AppError::store_write("constraint violation"));
            }
            self.inner.insert(fixture).await
        }

        async fn update(
            &self,
            id: &str,
            changes: &crate::fixture_scraper::models::FixtureUpdate,
        ) -> Result<StoredFixture, AppError> {
            self.inner.update(id, changes).await
        }
    }

    #[tokio::test]
    async fn test_one_failed_write_does_not_abort_the_batch() {
        let store = RejectingStore {
            inner: InMemoryFixtureStore::new(),
            reject_away: "Banks o' Dee".to_string(),
        };

        let outcome = merge_fixtures(&store, &batch()).await;
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.skip_reasons.len(), 1);
        assert!(outcome.skip_reasons[0].contains("insert failed"));
        assert_eq!(store.inner.len().await, 2);
    }
}
