use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream source a fixture or run report originated from.
///
/// The wire tag (`bbc-sport`, `highland-football-league`, ...) is persisted
/// alongside each fixture for provenance, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    BbcSport,
    HighlandFootballLeague,
    RssFeed,
    Transfermarkt,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::BbcSport => "bbc-sport",
            Source::HighlandFootballLeague => "highland-football-league",
            Source::RssFeed => "rss-feed",
            Source::Transfermarkt => "transfermarkt",
        }
    }

    pub const ALL: [Source; 4] = [
        Source::BbcSport,
        Source::HighlandFootballLeague,
        Source::RssFeed,
        Source::Transfermarkt,
    ];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bbc" | "bbc-sport" => Ok(Source::BbcSport),
            "highland" | "highland-league" | "highland-football-league" => {
                Ok(Source::HighlandFootballLeague)
            }
            "rss" | "rss-feed" => Ok(Source::RssFeed),
            "transfermarkt" | "tm" => Ok(Source::Transfermarkt),
            other => Err(format!(
                "unknown source '{other}' (expected bbc-sport, highland-football-league, rss-feed or transfermarkt)"
            )),
        }
    }
}

/// A fixture as extracted from one upstream document, before it has been
/// matched against the store. Created fresh on every run and discarded
/// after merging; carries no identity across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedFixture {
    /// Home team name as found in the source, not mapped to a canonical name
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    /// ISO 8601 calendar date. Adapters drop records they cannot date, so
    /// this is always well-formed by the time the merge engine sees it.
    pub date: String,
    /// Kickoff in HH:MM, defaulted to 15:00 when the source has none
    pub time: String,
    pub competition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// True only when two integer scores were parsed from the source text
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "homeScore")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<i32>,
    pub source: Source,
    /// Source-generated identifier. Only the Transfermarkt adapter sets
    /// this; it is not stable across runs and is never used for matching.
    #[serde(rename = "externalId", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl ScrapedFixture {
    /// The `(homeTeam, awayTeam, date)` triple used for store lookup.
    /// Time and competition are deliberately excluded, so two fixtures
    /// between the same pair on the same date collide.
    pub fn natural_key(&self) -> (&str, &str, &str) {
        (&self.home_team, &self.away_team, &self.date)
    }
}

/// A fixture as persisted by the external store: all scraped fields plus a
/// stable identifier. Rows are never deleted by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFixture {
    pub id: String,
    #[serde(rename = "homeTeam")]
    pub home_team: String,
    #[serde(rename = "awayTeam")]
    pub away_team: String,
    pub date: String,
    pub time: String,
    pub competition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "homeScore")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<i32>,
    pub source: Source,
    #[serde(rename = "externalId", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// The mutable-field subset applied when an existing row matches a scraped
/// fixture's natural key. Identity fields stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureUpdate {
    pub competition: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    #[serde(rename = "homeScore")]
    pub home_score: Option<i32>,
    #[serde(rename = "awayScore")]
    pub away_score: Option<i32>,
    pub source: Source,
}

impl From<&ScrapedFixture> for FixtureUpdate {
    fn from(fixture: &ScrapedFixture) -> Self {
        FixtureUpdate {
            competition: fixture.competition.clone(),
            time: fixture.time.clone(),
            venue: fixture.venue.clone(),
            is_completed: fixture.is_completed,
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            source: fixture.source,
        }
    }
}

/// Outcome class of one scrape invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    /// Fixtures were found and the merge step ran
    Success,
    /// The adapter ran without error but produced zero fixtures
    Warning,
    /// The adapter or fetch layer failed outright
    Error,
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScrapeStatus::Success => "success",
            ScrapeStatus::Warning => "warning",
            ScrapeStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// One append-only audit row per scrape invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeLogEntry {
    pub source: Source,
    pub status: ScrapeStatus,
    pub items_found: usize,
    pub items_added: usize,
    pub items_updated: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// RFC 3339 creation time
    pub timestamp: String,
}

/// Counts produced by one merge batch. `skipped`/`skip_reasons` cover
/// per-fixture persistence failures that did not abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_reasons: Vec<String>,
}

/// An adapter's extraction result: the fixtures it produced plus
/// diagnostics for rows it had to skip. Skipped rows never fail a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub fixtures: Vec<ScrapedFixture>,
    pub skipped_rows: usize,
    pub skip_reasons: Vec<String>,
}

impl ExtractionReport {
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skipped_rows += 1;
        self.skip_reasons.push(reason.into());
    }
}

/// Structured result of one top-level scrape invocation. The pipeline
/// always returns one of these; no error propagates past its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRunReport {
    pub source: Source,
    pub status: ScrapeStatus,
    pub items_found: usize,
    pub items_added: usize,
    pub items_updated: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Leading slice of the raw document, attached on failure for diagnosis
    #[serde(rename = "htmlSample", default, skip_serializing_if = "Option::is_none")]
    pub html_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_reasons: Vec<String>,
}

impl ScrapeRunReport {
    pub fn success(source: Source, found: usize, outcome: &MergeOutcome) -> Self {
        ScrapeRunReport {
            source,
            status: ScrapeStatus::Success,
            items_found: found,
            items_added: outcome.added,
            items_updated: outcome.updated,
            error: None,
            html_sample: None,
            skip_reasons: outcome.skip_reasons.clone(),
        }
    }

    pub fn warning(source: Source) -> Self {
        ScrapeRunReport {
            source,
            status: ScrapeStatus::Warning,
            items_found: 0,
            items_added: 0,
            items_updated: 0,
            error: None,
            html_sample: None,
            skip_reasons: Vec::new(),
        }
    }

    pub fn error(source: Source, message: impl Into<String>, html_sample: Option<String>) -> Self {
        ScrapeRunReport {
            source,
            status: ScrapeStatus::Error,
            items_found: 0,
            items_added: 0,
            items_updated: 0,
            error: Some(message.into()),
            html_sample,
            skip_reasons: Vec::new(),
        }
    }
}
