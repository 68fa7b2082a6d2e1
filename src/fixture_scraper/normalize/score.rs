//! Score and kickoff-time extraction.
//!
//! Sources pack both into loosely-structured text: BBC and the Highland
//! League write "2-1", Transfermarkt fuses "2 : 1" into the team-name
//! string, and upcoming fixtures carry a kickoff time where a score would
//! be. Malformed input is the common case here, not the exception, so
//! neither function ever fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::DEFAULT_KICKOFF_TIME;

/// Hyphen- or colon-separated integer pair
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[-:]\s*(\d+)").expect("valid regex"));

/// First H:MM / HH:MM token
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}:\d{2})\b").expect("valid regex"));

/// Extracts a `(home, away)` score pair from a text fragment. Returns
/// `Some` only when both sides parse as integers; anything else (a kickoff
/// time would match the colon form, so times are filtered out first,
/// "TBD", "P-P", empty text) yields `None`.
pub fn parse_score_pair(text: &str) -> Option<(i32, i32)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // A kickoff time like 15:00 is shaped exactly like a colon score;
    // treat time-shaped text as "no score"
    if looks_like_time(trimmed) {
        return None;
    }

    let caps = SCORE_RE.captures(trimmed)?;
    let home: i32 = caps[1].parse().ok()?;
    let away: i32 = caps[2].parse().ok()?;
    Some((home, away))
}

/// Returns the first `H:MM` token in `text` verbatim, or the default
/// kickoff when none is present. Never fails.
pub fn extract_kickoff_time(text: &str) -> String {
    TIME_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_KICKOFF_TIME.to_string())
}

/// True when the whole fragment is a clock time rather than a score.
/// `15:00` is a time; `2:1` is a score; `2-1` is always a score.
fn looks_like_time(text: &str) -> bool {
    let Some(caps) = TIME_RE.captures(text) else {
        return false;
    };
    let token = &caps[1];
    let Some((hours, minutes)) = token.split_once(':') else {
        return false;
    };
    // Minutes are always two digits in a clock time; scores almost never
    // are. 10:00 reads as a time, 10:0 as a score.
    let plausible_clock = minutes.len() == 2
        && hours.parse::<u32>().is_ok_and(|h| h < 24)
        && minutes.parse::<u32>().is_ok_and(|m| m < 60);
    plausible_clock && text.trim() == token
}
