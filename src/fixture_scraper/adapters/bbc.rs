//! BBC Sport scores & fixtures page adapter.
//!
//! The page groups match rows under date headings; every row inside a
//! block shares the block's date. A single "score or status" field holds
//! either a hyphenated score (finished) or a kickoff time (upcoming), so
//! completion is inferred from the shape of that text, not from any status
//! flag.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::constants::{club, sources};
use crate::fixture_scraper::models::{ExtractionReport, ScrapedFixture, Source};
use crate::fixture_scraper::normalize::{
    extract_kickoff_time, involves_tracked_club, mentions_tracked_club, parse_fixture_date_with_today,
    parse_score_pair,
};

use super::{FetchMode, ScrapeContext, SourceAdapter, element_text};

static BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.qa-match-block").expect("valid selector"));
static HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.sp-c-match-list-heading").expect("valid selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse(".sp-c-fixture").expect("valid selector"));
static HOME_TEAM: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sp-c-fixture__team--home .sp-c-fixture__team-name").expect("valid selector")
});
static AWAY_TEAM: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sp-c-fixture__team--away .sp-c-fixture__team-name").expect("valid selector")
});
static SCORE_OR_STATUS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".sp-c-fixture__score, .sp-c-fixture__status").expect("valid selector")
});

pub struct BbcSportAdapter;

impl SourceAdapter for BbcSportAdapter {
    fn source(&self) -> Source {
        Source::BbcSport
    }

    fn default_url(&self) -> &'static str {
        sources::BBC_SPORT_URL
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Direct
    }

    fn extract(&self, document: &str, ctx: &ScrapeContext) -> ExtractionReport {
        let html = Html::parse_document(document);
        let mut report = ExtractionReport::default();

        for block in html.select(&BLOCK) {
            let Some(heading) = block.select(&HEADING).next() else {
                report.skip("match block without a date heading");
                continue;
            };
            let heading_text = element_text(&heading);
            let Some(date) = parse_fixture_date_with_today(&heading_text, ctx.today) else {
                report.skip(format!("unparseable block date: '{heading_text}'"));
                continue;
            };

            for row in block.select(&ROW) {
                let home_team = row.select(&HOME_TEAM).next().map(|el| element_text(&el));
                let away_team = row.select(&AWAY_TEAM).next().map(|el| element_text(&el));
                let (Some(home_team), Some(away_team)) = (home_team, away_team) else {
                    report.skip(format!("row missing team names under '{heading_text}'"));
                    continue;
                };

                // Relevance gate comes first; most rows on the page are
                // other clubs' matches and deserve no further work
                if !involves_tracked_club(&home_team, &away_team) {
                    continue;
                }

                let status_text = row
                    .select(&SCORE_OR_STATUS)
                    .next()
                    .map(|el| element_text(&el))
                    .unwrap_or_default();

                let score = parse_score_pair(&status_text);
                let venue = if mentions_tracked_club(&home_team) {
                    club::HOME_GROUND
                } else {
                    club::AWAY_VENUE
                };

                debug!(
                    "BBC row: {home_team} v {away_team} on {date}, status '{status_text}'"
                );

                report.fixtures.push(ScrapedFixture {
                    home_team,
                    away_team,
                    date: date.clone(),
                    time: extract_kickoff_time(&status_text),
                    competition: sources::DEFAULT_COMPETITION.to_string(),
                    venue: Some(venue.to_string()),
                    is_completed: score.is_some(),
                    home_score: score.map(|(home, _)| home),
                    away_score: score.map(|(_, away)| away),
                    source: Source::BbcSport,
                    external_id: None,
                });
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> ScrapeContext {
        ScrapeContext::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn fixture_row(home: &str, away: &str, status: &str) -> String {
        format!(
            r#"<article class="sp-c-fixture">
                 <span class="sp-c-fixture__team--home">
                   <span class="sp-c-fixture__team-name">{home}</span>
                 </span>
                 <span class="sp-c-fixture__status">{status}</span>
                 <span class="sp-c-fixture__team--away">
                   <span class="sp-c-fixture__team-name">{away}</span>
                 </span>
               </article>"#
        )
    }

    fn match_block(heading: &str, rows: &[String]) -> String {
        format!(
            r#"<div class="qa-match-block">
                 <h3 class="sp-c-match-list-heading">{heading}</h3>
                 <ul>{}</ul>
               </div>"#,
            rows.join("\n")
        )
    }

    #[test]
    fn test_completed_fixture_with_score() {
        let document = match_block(
            "Saturday, 30th March 2024",
            &[fixture_row("Banks o' Dee", "Formartine United", "2-1")],
        );

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);

        let fixture = &report.fixtures[0];
        assert_eq!(fixture.home_team, "Banks o' Dee");
        assert_eq!(fixture.away_team, "Formartine United");
        assert_eq!(fixture.date, "2024-03-30");
        assert!(fixture.is_completed);
        assert_eq!(fixture.home_score, Some(2));
        assert_eq!(fixture.away_score, Some(1));
        assert_eq!(fixture.venue.as_deref(), Some("Spain Park"));
        assert_eq!(fixture.source, Source::BbcSport);
    }

    #[test]
    fn test_upcoming_fixture_with_kickoff_time() {
        let document = match_block(
            "Saturday, 8th June 2024",
            &[fixture_row("Fraserburgh", "Banks o' Dee", "19:45")],
        );

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);

        let fixture = &report.fixtures[0];
        assert_eq!(fixture.date, "2024-06-08");
        assert!(!fixture.is_completed);
        assert_eq!(fixture.home_score, None);
        assert_eq!(fixture.away_score, None);
        assert_eq!(fixture.time, "19:45");
        assert_eq!(fixture.venue.as_deref(), Some("Away"));
    }

    #[test]
    fn test_relative_date_heading() {
        let document = match_block("Today", &[fixture_row("Banks o' Dee", "Huntly", "15:00")]);

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);
        assert_eq!(report.fixtures[0].date, "2024-06-01");
    }

    #[test]
    fn test_other_clubs_are_skipped_silently() {
        let document = match_block(
            "Saturday, 30th March 2024",
            &[
                fixture_row("Formartine United", "Huntly", "1-1"),
                fixture_row("Banks o' Dee", "Buckie Thistle", "3-0"),
                fixture_row("Keith", "Brora Rangers", "15:00"),
            ],
        );

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);
        assert_eq!(report.fixtures[0].home_team, "Banks o' Dee");
        // Irrelevant rows are not diagnostics
        assert_eq!(report.skipped_rows, 0);
    }

    #[test]
    fn test_unparseable_block_date_drops_whole_block() {
        let document = format!(
            "{}{}",
            match_block(
                "Date to be confirmed",
                &[fixture_row("Banks o' Dee", "Huntly", "15:00")]
            ),
            match_block(
                "Saturday, 30th March 2024",
                &[fixture_row("Banks o' Dee", "Formartine United", "2-1")]
            ),
        );

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);
        assert_eq!(report.fixtures[0].date, "2024-03-30");
        assert_eq!(report.skipped_rows, 1);
        assert!(report.skip_reasons[0].contains("Date to be confirmed"));
    }

    #[test]
    fn test_empty_document_yields_no_fixtures() {
        let report = BbcSportAdapter.extract("<html><body></body></html>", &ctx());
        assert!(report.fixtures.is_empty());
        assert_eq!(report.skipped_rows, 0);
    }

    #[test]
    fn test_completed_fixture_defaults_kickoff_time() {
        let document = match_block(
            "Saturday, 30th March 2024",
            &[fixture_row("Banks o' Dee", "Formartine United", "2-1")],
        );

        let report = BbcSportAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures[0].time, "15:00");
    }
}
