//! RSS feed adapter.
//!
//! Consumes a fixtures/results feed directly rather than an HTML page.
//! Item titles carry the fixture ("Banks o' Dee v Formartine United", or
//! "Banks o' Dee 2-1 Formartine United" once played); the description and
//! pubDate fill in whatever the title lacks. Items run through the same
//! normalizers as the HTML sources.

use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{club, sources};
use crate::fixture_scraper::models::{ExtractionReport, ScrapedFixture, Source};
use crate::fixture_scraper::normalize::{
    extract_kickoff_time, involves_tracked_club, mentions_tracked_club,
    parse_fixture_date_with_today,
};

use super::{FetchMode, ScrapeContext, SourceAdapter};

static ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<item[^>]*>(.*?)</item>").expect("valid regex"));
static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<title[^>]*>\s*(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?\s*</title>")
        .expect("valid regex")
});
static DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<description[^>]*>\s*(?:<!\[CDATA\[)?(.*?)(?:\]\]>)?\s*</description>")
        .expect("valid regex")
});
static PUB_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<pubDate[^>]*>\s*(.*?)\s*</pubDate>").expect("valid regex"));

/// "Home 2-1 Away" result title
static RESULT_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+(\d+)\s*-\s*(\d+)\s+(.*)$").expect("valid regex"));

/// "Home v Away" / "Home vs Away" fixture title
static FIXTURE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+vs?\.?\s+").expect("valid regex"));

pub struct RssFeedAdapter;

impl SourceAdapter for RssFeedAdapter {
    fn source(&self) -> Source {
        Source::RssFeed
    }

    fn default_url(&self) -> &'static str {
        sources::RSS_FEED_URL
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Direct
    }

    fn extract(&self, document: &str, ctx: &ScrapeContext) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        for item in ITEM.captures_iter(document) {
            let body = &item[1];

            let Some(title) = TITLE.captures(body).map(|caps| decode_entities(&caps[1])) else {
                report.skip("feed item without a title");
                continue;
            };
            let description = DESCRIPTION
                .captures(body)
                .map(|caps| decode_entities(&caps[1]))
                .unwrap_or_default();

            let Some((home_team, away_team, score)) = parse_title(&title) else {
                report.skip(format!("unrecognized item title: '{title}'"));
                continue;
            };

            if !involves_tracked_club(&home_team, &away_team) {
                continue;
            }

            // Fixture date lives in the description when present; the
            // pubDate is only a publication time but beats dropping the item
            let date = parse_fixture_date_with_today(&description, ctx.today)
                .or_else(|| parse_fixture_date_with_today(&title, ctx.today))
                .or_else(|| pub_date_to_iso(body));
            let Some(date) = date else {
                report.skip(format!("no usable date for item: '{title}'"));
                continue;
            };

            let venue = if mentions_tracked_club(&home_team) {
                club::HOME_GROUND
            } else {
                club::AWAY_VENUE
            };

            report.fixtures.push(ScrapedFixture {
                home_team,
                away_team,
                date,
                time: extract_kickoff_time(&description),
                competition: sources::DEFAULT_COMPETITION.to_string(),
                venue: Some(venue.to_string()),
                is_completed: score.is_some(),
                home_score: score.map(|(home, _)| home),
                away_score: score.map(|(_, away)| away),
                source: Source::RssFeed,
                external_id: None,
            });
        }

        report
    }
}

/// Splits an item title into team names and an optional score.
fn parse_title(title: &str) -> Option<(String, String, Option<(i32, i32)>)> {
    if let Some(caps) = RESULT_TITLE.captures(title) {
        let home_score: i32 = caps[2].parse().ok()?;
        let away_score: i32 = caps[3].parse().ok()?;
        return Some((
            caps[1].trim().to_string(),
            caps[4].trim().to_string(),
            Some((home_score, away_score)),
        ));
    }

    let mut teams = FIXTURE_TITLE.splitn(title, 2);
    let home = teams.next()?.trim();
    let away = teams.next()?.trim();
    if home.is_empty() || away.is_empty() {
        return None;
    }
    Some((home.to_string(), away.to_string(), None))
}

fn pub_date_to_iso(item_body: &str) -> Option<String> {
    let raw = PUB_DATE.captures(item_body)?;
    let parsed = DateTime::parse_from_rfc2822(raw[1].trim()).ok()?;
    Some(parsed.format("%Y-%m-%d").to_string())
}

/// Minimal entity decoding for feed text; the handful seen in the wild
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> ScrapeContext {
        ScrapeContext::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    fn feed(items: &[&str]) -> String {
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Fixtures</title>{}</channel></rss>"#,
            items.join("\n")
        )
    }

    #[test]
    fn test_upcoming_fixture_item() {
        let document = feed(&[r#"<item>
            <title>Banks o&#39; Dee v Formartine United</title>
            <description>Saturday 8th June 2024, 15:00 kick-off</description>
            <pubDate>Mon, 03 Jun 2024 09:00:00 +0000</pubDate>
        </item>"#]);

        let report = RssFeedAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);

        let fixture = &report.fixtures[0];
        assert_eq!(fixture.home_team, "Banks o' Dee");
        assert_eq!(fixture.away_team, "Formartine United");
        assert_eq!(fixture.date, "2024-06-08");
        assert_eq!(fixture.time, "15:00");
        assert!(!fixture.is_completed);
        assert_eq!(fixture.source, Source::RssFeed);
    }

    #[test]
    fn test_result_item_with_score() {
        let document = feed(&[r#"<item>
            <title><![CDATA[Banks o' Dee 2-1 Buckie Thistle]]></title>
            <description>Full time at Spain Park, 30th March 2024</description>
        </item>"#]);

        let report = RssFeedAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);

        let fixture = &report.fixtures[0];
        assert!(fixture.is_completed);
        assert_eq!(fixture.home_score, Some(2));
        assert_eq!(fixture.away_score, Some(1));
        assert_eq!(fixture.date, "2024-03-30");
        assert_eq!(fixture.venue.as_deref(), Some("Spain Park"));
    }

    #[test]
    fn test_pub_date_fallback() {
        let document = feed(&[r#"<item>
            <title>Keith vs Banks o' Dee</title>
            <description>League fixture</description>
            <pubDate>Sat, 20 Apr 2024 12:00:00 +0000</pubDate>
        </item>"#]);

        let report = RssFeedAdapter.extract(&document, &ctx());
        assert_eq!(report.fixtures.len(), 1);
        assert_eq!(report.fixtures[0].date, "2024-04-20");
        assert_eq!(report.fixtures[0].venue.as_deref(), Some("Away"));
    }

    #[test]
    fn test_undated_item_is_dropped() {
        let document = feed(&[r#"<item>
            <title>Banks o' Dee v Fraserburgh</title>
            <description>Date to be confirmed</description>
        </item>"#]);

        let report = RssFeedAdapter.extract(&document, &ctx());
        assert!(report.fixtures.is_empty());
        assert_eq!(report.skipped_rows, 1);
        assert!(report.skip_reasons[0].contains("no usable date"));
    }

    #[test]
    fn test_irrelevant_and_malformed_items() {
        let document = feed(&[
            r#"<item><title>Formartine United v Huntly</title><pubDate>Sat, 20 Apr 2024 12:00:00 +0000</pubDate></item>"#,
            r#"<item><title>Club shop summer opening hours</title></item>"#,
            r#"<item><description>no title at all</description></item>"#,
        ]);

        let report = RssFeedAdapter.extract(&document, &ctx());
        assert!(report.fixtures.is_empty());
        // Irrelevant fixture: silent. Unrecognized title + missing title:
        // diagnostics.
        assert_eq!(report.skipped_rows, 2);
    }
}
