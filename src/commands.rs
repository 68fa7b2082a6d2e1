//! Non-scrape command handling: configuration management and source
//! listing, split out of `main` to keep the pipeline path readable.

use crate::cli::Args;
use dee_fixtures::config::Config;
use dee_fixtures::error::AppError;
use dee_fixtures::fixture_scraper::{Source, adapter_for};

/// Handles configuration operations. Callers gate on
/// [`crate::cli::is_config_mode`] before invoking.
pub async fn handle_config_commands(args: &Args) -> Result<(), AppError> {
    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Prints the supported sources with their fetch defaults. Returns `true`
/// when the listing was requested.
pub fn handle_list_sources(args: &Args) -> bool {
    if !args.list_sources {
        return false;
    }

    println!("Supported sources:");
    for source in Source::ALL {
        let adapter = adapter_for(source);
        println!("  {:<26} {}", source.as_str(), adapter.default_url());
    }
    true
}
