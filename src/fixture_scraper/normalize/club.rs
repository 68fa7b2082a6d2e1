//! Tracked-club relevance filtering.
//!
//! Upstream listings cover the whole league; only rows involving
//! Banks o' Dee become fixtures. Sources disagree on the apostrophe
//! ("Banks o' Dee", "Banks O'Dee", "Banks o Dee FC"), so matching is a
//! case-insensitive substring check over the known spelling variants.

use crate::constants::club;

/// True when `text` contains any spelling variant of the tracked club.
pub fn mentions_tracked_club(text: &str) -> bool {
    let lower = text.to_lowercase();
    club::NAME_VARIANTS
        .iter()
        .any(|variant| lower.contains(variant))
}

/// True when either team of a fixture row is the tracked club. This is the
/// sole gate deciding whether a row becomes a fixture at all; non-matching
/// rows are skipped silently.
pub fn involves_tracked_club(home_team: &str, away_team: &str) -> bool {
    mentions_tracked_club(home_team) || mentions_tracked_club(away_team)
}
