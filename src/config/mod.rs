use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::get_config_path;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
///
/// Everything here is ambient tooling configuration - log location, HTTP
/// timeout, per-source URL overrides, store location. The scraping
/// pipeline itself never reads this; `main` resolves it into explicit
/// parameters.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path to the log file. If not specified, logs go to the default
    /// location under the platform config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for fetches. Defaults to 30 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path of the JSON fixture store used by the CLI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file_path: Option<String>,
    /// Per-source document URL overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbc_sport_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highland_league_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss_feed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfermarkt_url: Option<String>,
    /// Relay proxy prefixes tried in order; defaults to the built-in chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_prefixes: Option<Vec<String>>,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            store_file_path: None,
            bbc_sport_url: None,
            highland_league_url: None,
            rss_feed_url: None,
            transfermarkt_url: None,
            relay_prefixes: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, falling
    /// back to defaults when no file exists. Environment variables
    /// override file values.
    ///
    /// # Environment Variables
    /// - `DEE_FIXTURES_LOG_FILE` - Override log file path
    /// - `DEE_FIXTURES_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `DEE_FIXTURES_STORE_FILE` - Override fixture store path
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(log_file_path) = std::env::var(crate::constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(crate::constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        if let Ok(store_file_path) = std::env::var(crate::constants::env_vars::STORE_FILE) {
            config.store_file_path = Some(store_file_path);
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &[
                &self.bbc_sport_url,
                &self.highland_league_url,
                &self.rss_feed_url,
                &self.transfermarkt_url,
            ],
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// URL override for one source, if configured.
    pub fn source_url_override(&self, source: crate::fixture_scraper::Source) -> Option<&str> {
        use crate::fixture_scraper::Source;
        match source {
            Source::BbcSport => self.bbc_sport_url.as_deref(),
            Source::HighlandFootballLeague => self.highland_league_url.as_deref(),
            Source::RssFeed => self.rss_feed_url.as_deref(),
            Source::Transfermarkt => self.transfermarkt_url.as_deref(),
        }
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// The fixture store path: configured value or platform default.
    pub fn store_path(&self) -> String {
        self.store_file_path
            .clone()
            .unwrap_or_else(paths::get_default_store_path)
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = paths::get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Fixture Store:");
            println!("{}", config.store_path());
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/dee_fixtures.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("Defaults are in effect.");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent
    /// directory if needed.
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path (for testing).
    #[allow(dead_code)] // Used in tests
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
