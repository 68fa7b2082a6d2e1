//! Highland Football League website adapter.
//!
//! The fixtures page is plain HTML tables: date in the first cell,
//! "<home> v <away>" in the second, venue text in the third. The venue
//! cell is stored verbatim; this source never carries scores, so every
//! fixture it produces is not-yet-completed.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::constants::sources;
use crate::fixture_scraper::models::{ExtractionReport, ScrapedFixture, Source};
use crate::fixture_scraper::normalize::{
    extract_kickoff_time, involves_tracked_club, parse_fixture_date_with_today,
};

use super::{FetchMode, ScrapeContext, SourceAdapter, element_text};

static TABLE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("valid selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

/// The literal `v` separator between team names, as a standalone token
static TEAM_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+v\s+").expect("valid regex"));

pub struct HighlandLeagueAdapter;

impl SourceAdapter for HighlandLeagueAdapter {
    fn source(&self) -> Source {
        Source::HighlandFootballLeague
    }

    fn default_url(&self) -> &'static str {
        sources::HIGHLAND_LEAGUE_URL
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Relayed
    }

    fn extract(&self, document: &str, ctx: &ScrapeContext) -> ExtractionReport {
        let html = Html::parse_document(document);
        let mut report = ExtractionReport::default();

        for row in html.select(&TABLE_ROW) {
            let cells: Vec<String> = row.select(&CELL).map(|cell| element_text(&cell)).collect();

            // Header rows carry <th> cells only; not worth a diagnostic
            if cells.is_empty() {
                continue;
            }
            if cells.len() < 3 {
                report.skip(format!("row has {} cells, expected 3", cells.len()));
                continue;
            }

            let date_text = &cells[0];
            let fixture_text = &cells[1];
            let venue_text = cells[2].trim();

            let Some(date) = parse_fixture_date_with_today(date_text, ctx.today) else {
                report.skip(format!("unparseable date: '{date_text}'"));
                continue;
            };

            let mut teams = TEAM_SEPARATOR.splitn(fixture_text, 2);
            let (Some(home_team), Some(away_team)) = (teams.next(), teams.next()) else {
                report.skip(format!("no team separator in: '{fixture_text}'"));
                continue;
            };
            let home_team = home_team.trim().to_string();
            let away_team = away_team.trim().to_string();

            if !involves_tracked_club(&home_team, &away_team) {
                continue;
            }

            let venue = if venue_text.is_empty() {
                None
            } else {
                Some(venue_text.to_string())
            };

            report.fixtures.push(ScrapedFixture {
                home_team,
                away_team,
                date,
                time: extract_kickoff_time(date_text),
                competition: sources::DEFAULT_COMPETITION.to_string(),
                venue,
                is_completed: false,
                home_score: None,
                away_score: None,
                source: Source::HighlandFootballLeague,
                external_id: None,
            });
        }

        report
    }
}
