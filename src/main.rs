// src/main.rs
mod cli;
mod commands;
mod logging;

use chrono::NaiveDate;
use clap::Parser;
use cli::Args;
use dee_fixtures::config::Config;
use dee_fixtures::error::AppError;
use dee_fixtures::fixture_scraper::adapters::ScrapeContext;
use dee_fixtures::fixture_scraper::fetch::create_http_client_with_timeout;
use dee_fixtures::fixture_scraper::json_store::JsonFileStore;
use dee_fixtures::fixture_scraper::{
    PreviewReport, ScrapeRunReport, ScraperSettings, Source, scrape_and_store, scrape_preview,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if commands::handle_list_sources(&args) {
        return Ok(());
    }
    if cli::is_config_mode(&args) {
        commands::handle_config_commands(&args).await?;
        return Ok(());
    }

    let Some(source_arg) = args.source.as_deref() else {
        return Err(AppError::config_error(
            "No source given. Use --source (see --list-sources for the options).",
        ));
    };
    let source: Source = source_arg.parse().map_err(AppError::config_error)?;

    // A pinned date keeps relative keywords (Today/Tomorrow) reproducible
    let ctx = match &args.date {
        Some(date) => {
            let today = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                AppError::config_error(format!("Invalid --date '{date}' (expected YYYY-MM-DD): {e}"))
            })?;
            ScrapeContext::on(today)
        }
        None => ScrapeContext::now(),
    };

    let config = Config::load().await?;
    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
    let settings = match &config.relay_prefixes {
        Some(prefixes) => ScraperSettings {
            relay_prefixes: prefixes.clone(),
        },
        None => ScraperSettings::default(),
    };
    let url_override = args
        .url
        .as_deref()
        .or_else(|| config.source_url_override(source));

    if args.preview {
        let report = scrape_preview(&client, &settings, source, url_override, &ctx).await;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_preview(&report);
        }
        return Ok(());
    }

    let store_path = args.store_file.clone().unwrap_or_else(|| config.store_path());
    let store = JsonFileStore::open(&store_path).await?;
    let report = scrape_and_store(
        &client,
        &settings,
        source,
        url_override,
        &ctx,
        &store,
        &store,
    )
    .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_run(&report, &store_path);
    }

    Ok(())
}

fn print_preview(report: &PreviewReport) {
    if report.success {
        println!(
            "{}: extracted {} fixture(s)",
            report.source,
            report.data.len()
        );
        for fixture in &report.data {
            let score = if fixture.is_completed {
                format!(
                    " {}-{}",
                    fixture.home_score.unwrap_or_default(),
                    fixture.away_score.unwrap_or_default()
                )
            } else {
                format!(" ({})", fixture.time)
            };
            println!(
                "  {} {} v {}{}  [{}]",
                fixture.date, fixture.home_team, fixture.away_team, score, fixture.competition
            );
        }
        if report.data.is_empty()
            && let Some(sample) = &report.html_sample
        {
            println!("  (no fixtures found; document starts: {:.120}...)", sample);
        }
    } else {
        println!(
            "{}: FAILED - {}",
            report.source,
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    for reason in &report.skip_reasons {
        println!("  skipped: {reason}");
    }
}

fn print_run(report: &ScrapeRunReport, store_path: &str) {
    println!(
        "{} [{}]: found {}, added {}, updated {}",
        report.source, report.status, report.items_found, report.items_added, report.items_updated
    );
    if let Some(error) = &report.error {
        println!("  error: {error}");
    }
    for reason in &report.skip_reasons {
        println!("  skipped: {reason}");
    }
    println!("  store: {store_path}");
}
