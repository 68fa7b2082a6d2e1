use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines whether the invocation is a configuration operation rather
/// than a scrape run.
pub fn is_config_mode(args: &Args) -> bool {
    args.new_log_file_path.is_some() || args.clear_log_file_path || args.list_config
}

/// Banks o' Dee FC fixture scraper
///
/// Fetches fixtures and results from the supported upstream sources
/// (BBC Sport, the Highland Football League site, an RSS feed,
/// Transfermarkt), normalizes them and upserts them into the fixture
/// store, recording one audit entry per run.
#[derive(Parser, Debug)]
#[command(author = "Banks o' Dee FC web team", about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Source to scrape: bbc-sport, highland-football-league, rss-feed or
    /// transfermarkt (short aliases bbc, highland, rss, tm work too).
    #[arg(short, long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Override the source document URL for this run.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Fetch and extract only; print what would be stored without touching
    /// the fixture store. The "test connection" path.
    #[arg(short, long)]
    pub preview: bool,

    /// Print the run report as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Resolve relative dates (Today/Tomorrow) against this date instead
    /// of the system clock, YYYY-MM-DD format.
    #[arg(long = "date", short = 'd', value_name = "DATE")]
    pub date: Option<String>,

    /// List the supported sources and their default URLs.
    #[arg(long = "list-sources", short = 'S')]
    pub list_sources: bool,

    /// Path of the JSON fixture store for this run.
    #[arg(long = "store-file", help_heading = "Configuration", value_name = "PATH")]
    pub store_file: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode: verbose diagnostics on stdout as well as the log
    /// file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs are written
    /// to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
