//! Pure text normalizers shared by every source adapter.

pub mod club;
pub mod date;
pub mod score;

pub use club::{involves_tracked_club, mentions_tracked_club};
pub use date::{parse_fixture_date, parse_fixture_date_with_today};
pub use score::{extract_kickoff_time, parse_score_pair};
