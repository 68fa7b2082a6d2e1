//! Free-text date normalization.
//!
//! Every source formats fixture dates differently: BBC headings read
//! "Saturday, 30th March 2024", the Highland League site mixes
//! "Saturday 30th March 2024" with "30/03/2024", and Transfermarkt uses
//! "30.03.24". All of them funnel through here and come out as an ISO
//! `YYYY-MM-DD` string, or `None` when nothing recognizable matched.
//! Callers must drop undated records rather than guess.

use chrono::{Days, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// `DD.MM.YY`, `DD/MM/YYYY` and similar numeric forms
static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[./](\d{1,2})[./](\d{2,4})\b").expect("valid regex"));

/// Ordinal suffixes on day numbers: 1st, 2nd, 3rd, 4th, ...
static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses a free-text date fragment into an ISO date, resolving relative
/// keywords against the current local date.
pub fn parse_fixture_date(text: &str) -> Option<String> {
    parse_fixture_date_with_today(text, Local::now().date_naive())
}

/// Deterministic core of [`parse_fixture_date`]: relative keywords resolve
/// against the supplied `today` instead of the wall clock.
pub fn parse_fixture_date_with_today(text: &str, today: NaiveDate) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();

    // Relative keywords are substring matches: BBC emits "Today, 15:00"
    if lower.contains("yesterday") {
        return Some(today.checked_sub_days(Days::new(1))?.format("%Y-%m-%d").to_string());
    }
    if lower.contains("tomorrow") {
        return Some(today.checked_add_days(Days::new(1))?.format("%Y-%m-%d").to_string());
    }
    if lower.contains("today") {
        return Some(today.format("%Y-%m-%d").to_string());
    }

    if let Some(date) = parse_numeric_date(trimmed) {
        return Some(date);
    }

    parse_text_date(trimmed)
}

/// `30.03.24` / `30/03/2024` style. Two-digit years expand by prefixing 20.
fn parse_numeric_date(text: &str) -> Option<String> {
    let caps = NUMERIC_DATE_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_raw = &caps[3];
    let year: i32 = if year_raw.len() == 2 {
        format!("20{year_raw}").parse().ok()?
    } else {
        year_raw.parse().ok()?
    };

    // Reject impossible dates instead of wrapping them
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// "Saturday, 30th March 2024" style: strip ordinal suffixes, try chrono's
/// named formats, then fall back to manual token splitting against the
/// month table (covers sources whose weekday names don't agree with the
/// date, which chrono rejects).
fn parse_text_date(text: &str) -> Option<String> {
    let stripped = ORDINAL_RE.replace_all(text, "$1");
    let cleaned = stripped.replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    const FORMATS: [&str; 4] = ["%A %d %B %Y", "%d %B %Y", "%A %d %b %Y", "%d %b %Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    split_tokens_date(&cleaned)
}

fn split_tokens_date(cleaned: &str) -> Option<String> {
    let mut day: Option<u32> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;

    for token in cleaned.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric());
        if token.is_empty() {
            continue;
        }
        if let Ok(number) = token.parse::<u32>() {
            if token.len() == 4 {
                year = year.or(Some(number as i32));
            } else if number >= 1 && number <= 31 {
                day = day.or(Some(number));
            }
        } else if let Some(index) = month_index(token) {
            month = month.or(Some(index));
        }
    }

    let date = NaiveDate::from_ymd_opt(year?, month?, day?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Month name to 1-based index; accepts full names and three-letter
/// abbreviations.
fn month_index(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|month| *month == lower || (lower.len() == 3 && month.starts_with(&lower)))
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_relative_keywords() {
        assert_eq!(
            parse_fixture_date_with_today("Today", today()),
            Some("2024-06-01".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("Today, 15:00", today()),
            Some("2024-06-01".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("YESTERDAY", today()),
            Some("2024-05-31".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("tomorrow evening", today()),
            Some("2024-06-02".to_string())
        );
    }

    #[test]
    fn test_ordinal_absolute_dates() {
        assert_eq!(
            parse_fixture_date_with_today("Saturday, 30th March 2024", today()),
            Some("2024-03-30".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("1st June 2024", today()),
            Some("2024-06-01".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("22nd February 2025", today()),
            Some("2025-02-22".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("3rd Aug 2024", today()),
            Some("2024-08-03".to_string())
        );
    }

    #[test]
    fn test_wrong_weekday_falls_back_to_token_split() {
        // 30 March 2024 was a Saturday; chrono rejects the mismatched
        // weekday so the token-split fallback must carry it
        assert_eq!(
            parse_fixture_date_with_today("Friday, 30th March 2024", today()),
            Some("2024-03-30".to_string())
        );
    }

    #[test]
    fn test_numeric_dates() {
        assert_eq!(
            parse_fixture_date_with_today("30.03.24", today()),
            Some("2024-03-30".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("30.03.2024", today()),
            Some("2024-03-30".to_string())
        );
        assert_eq!(
            parse_fixture_date_with_today("05/10/2024", today()),
            Some("2024-10-05".to_string())
        );
        // Zero-padding of single-digit day and month
        assert_eq!(
            parse_fixture_date_with_today("5.8.24", today()),
            Some("2024-08-05".to_string())
        );
    }

    #[test]
    fn test_invalid_numeric_dates_are_dropped() {
        assert_eq!(parse_fixture_date_with_today("32.03.24", today()), None);
        assert_eq!(parse_fixture_date_with_today("30.13.24", today()), None);
    }

    #[test]
    fn test_unrecognized_text_yields_none() {
        assert_eq!(parse_fixture_date_with_today("", today()), None);
        assert_eq!(parse_fixture_date_with_today("   ", today()), None);
        assert_eq!(parse_fixture_date_with_today("TBC", today()), None);
        assert_eq!(
            parse_fixture_date_with_today("Postponed until further notice", today()),
            None
        );
        // Month name with no usable day or year
        assert_eq!(parse_fixture_date_with_today("sometime in March", today()), None);
    }

    #[test]
    fn test_wall_clock_wrapper_handles_absolute_dates() {
        // Absolute dates don't depend on the injected today value
        assert_eq!(
            parse_fixture_date("30.03.24"),
            Some("2024-03-30".to_string())
        );
        assert_eq!(parse_fixture_date("TBC"), None);
    }

    #[test]
    fn test_three_letter_month_abbreviations() {
        assert_eq!(month_index("mar"), Some(3));
        assert_eq!(month_index("Mar"), Some(3));
        assert_eq!(month_index("december"), Some(12));
        assert_eq!(month_index("dec"), Some(12));
        assert_eq!(month_index("ma"), None);
        assert_eq!(month_index("xyz"), None);
    }

}
