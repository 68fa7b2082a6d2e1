//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, default URLs and tuning values
//! so the scraping pipeline stays configurable from one place.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Kickoff time assumed when a source lists no explicit time
pub const DEFAULT_KICKOFF_TIME: &str = "15:00";

/// Maximum number of characters of a raw document attached to a failure
/// report for diagnosis
pub const HTML_SAMPLE_MAX_CHARS: usize = 1000;

/// Tracked club identity
pub mod club {
    /// Spelling variants seen across upstream sources, lowercase.
    /// Matching is case-insensitive substring, so the plain `banks o dee`
    /// variant also covers `banks o dee fc`.
    pub const NAME_VARIANTS: [&str; 3] = ["banks o' dee", "banks o dee", "banks o'dee"];

    /// Home ground, used when a source gives home advantage but no venue
    pub const HOME_GROUND: &str = "Spain Park";

    /// Venue placeholder for away fixtures with no ground listed
    pub const AWAY_VENUE: &str = "Away";
}

/// Default upstream document URLs, overridable per invocation
pub mod sources {
    pub const BBC_SPORT_URL: &str =
        "https://www.bbc.com/sport/football/scottish-highland-league/scores-fixtures";

    pub const HIGHLAND_LEAGUE_URL: &str = "http://www.highlandfootballleague.com/Fixtures/";

    pub const RSS_FEED_URL: &str = "http://www.highlandfootballleague.com/rss/fixtures.xml";

    pub const TRANSFERMARKT_URL: &str =
        "https://www.transfermarkt.com/banks-o-dee-fc/spielplan/verein/65968";

    /// Competition recorded when a source does not state one
    pub const DEFAULT_COMPETITION: &str = "Scottish Highland League";
}

/// Public CORS-relay prefixes, tried in order until one yields a document.
/// Each prefix is concatenated with the percent-encoded target URL.
pub mod proxy {
    pub const RELAY_PREFIXES: [&str; 3] = [
        "https://corsproxy.io/?",
        "https://api.allorigins.win/raw?url=",
        "https://api.codetabs.com/v1/proxy?quest=",
    ];
}

/// Browser-like request headers sent with every fetch attempt.
/// Upstream sources block obvious non-browser clients.
pub mod headers {
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    pub const ACCEPT: &str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,*/*;q=0.8";

    pub const ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9";

    pub const REFERER: &str = "https://www.google.com/";
}

/// Environment variable names
pub mod env_vars {
    /// Override the log file path
    pub const LOG_FILE: &str = "DEE_FIXTURES_LOG_FILE";

    /// Override the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "DEE_FIXTURES_HTTP_TIMEOUT";

    /// Override the fixture store file path
    pub const STORE_FILE: &str = "DEE_FIXTURES_STORE_FILE";
}

/// Retry configuration for direct fetches. Proxied fetches are single-shot
/// per relay; the relay list itself is the fallback chain.
pub mod retry {
    /// Maximum number of retry attempts for transient failures
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_club_variants_are_lowercase() {
        for variant in club::NAME_VARIANTS {
            assert_eq!(variant, variant.to_lowercase());
            assert!(!variant.is_empty());
        }
    }

    #[test]
    fn test_source_urls_are_absolute() {
        let urls = [
            sources::BBC_SPORT_URL,
            sources::HIGHLAND_LEAGUE_URL,
            sources::RSS_FEED_URL,
            sources::TRANSFERMARKT_URL,
        ];
        for url in urls {
            assert!(
                url.starts_with("http://") || url.starts_with("https://"),
                "source URL should be absolute: {url}"
            );
        }
    }

    #[test]
    fn test_proxy_prefixes_end_with_query_delimiter() {
        // Each prefix must be ready for direct concatenation with an
        // encoded target URL
        for prefix in proxy::RELAY_PREFIXES {
            assert!(
                prefix.ends_with('?') || prefix.ends_with('='),
                "relay prefix should end at a query position: {prefix}"
            );
        }
    }

    #[test]
    fn test_default_kickoff_is_well_formed() {
        assert_eq!(DEFAULT_KICKOFF_TIME.len(), 5);
        assert_eq!(&DEFAULT_KICKOFF_TIME[2..3], ":");
    }

    #[test]
    fn test_retry_constants_are_reasonable() {
        assert!(retry::MAX_ATTEMPTS > 0);
        assert!(retry::BASE_DELAY_MS > 0);
    }
}
