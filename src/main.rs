// src/main.rs

//! Scout CLI
//!
//! Watches Ashby job boards, filters postings against configured keyword
//! and location rules, and sends a Telegram digest of new matches. The run
//! cadence comes from whatever triggers the binary (cron, CI schedule).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scout::bot::run_bot;
use scout::error::Result;
use scout::matcher::Matcher;
use scout::models::{BoardList, Config, telegram_credentials};
use scout::notify::{NullNotifier, TelegramNotifier};
use scout::pipeline::{RunMode, ScanReport, run_scan};
use scout::services::AshbyClient;
use scout::storage::LocalSeenStore;
use scout::utils::http;

/// Scout - Ashby Job Board Watcher
#[derive(Parser, Debug)]
#[command(name = "scout", version, about = "Ashby job board watcher")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan all tracked boards and send the digest
    Scan {
        /// Print the digest instead of sending it; never persists
        #[arg(long)]
        dry_run: bool,

        /// Report all matched jobs, bypassing seen history; never persists
        #[arg(long, conflicts_with = "dry_run")]
        ignore_seen: bool,
    },

    /// Process pending Telegram commands (/list, /add, /remove, /runall)
    Bot,

    /// Validate configuration and the tracked board list
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Scan {
            dry_run,
            ignore_seen,
        } => {
            let mode = if dry_run {
                RunMode::DryRun
            } else if ignore_seen {
                RunMode::IgnoreSeen
            } else {
                RunMode::Normal
            };

            let boards = BoardList::load(&config.paths.boards_file)?;
            boards.validate()?;
            log::info!("Tracking {} boards", boards.boards.len());

            let matcher = Matcher::new(&config.filters);
            let source = AshbyClient::new(&config.http)?;
            let store = LocalSeenStore::new(&config.paths.state_file);

            let report = match mode {
                RunMode::DryRun => {
                    // Dry runs never send, so no credentials are needed.
                    run_scan(&boards, &matcher, mode, &source, &store, &NullNotifier).await?
                }
                _ => {
                    let (token, chat_id) = telegram_credentials()?;
                    let client = http::create_client(&config.http)?;
                    let notifier = TelegramNotifier::new(client, &config.notify, token, chat_id);
                    run_scan(&boards, &matcher, mode, &source, &store, &notifier).await?
                }
            };

            log_report(&report);
        }

        Command::Bot => {
            run_bot(&config).await?;
            log::info!("Command processing complete");
        }

        Command::Validate => {
            log::info!("✓ Config OK ({})", cli.config.display());
            log::info!("  User agent: {}", config.http.user_agent);
            log::info!("  Timeout: {}s", config.http.timeout_secs);
            log::info!(
                "  Filters: {} include, {} exclude, {} locations",
                config.filters.include.len(),
                config.filters.exclude.len(),
                config.filters.locations_include.len()
            );

            let boards = BoardList::load(&config.paths.boards_file)?;
            boards.validate()?;
            log::info!(
                "✓ Board list OK ({} boards in {})",
                boards.boards.len(),
                config.paths.boards_file.display()
            );

            log::info!("All validations passed!");
        }
    }

    Ok(())
}

fn log_report(report: &ScanReport) {
    log::info!(
        "Scan complete: {} matched, {} reported, {} board errors",
        report.matched,
        report.reported,
        report.errors.len()
    );
    for error in &report.errors {
        log::warn!("  {}: {}", error.company, error.reason);
    }
}
