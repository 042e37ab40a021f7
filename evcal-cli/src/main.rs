mod commands;
mod input;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use evcal_core::config::EngineConfig;
use input::FeedArgs;

#[derive(Parser)]
#[command(name = "evcal")]
#[command(about = "Browse the events directory as a calendar and export days to .ics")]
struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Six-week month grid
    Month {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Sunday-to-Saturday week columns
    Week {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Chronological list for the anchor's month
    List {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Events on one day, optionally exported to .ics
    Day {
        /// Day to open (YYYY-MM-DD)
        #[arg(value_parser = input::parse_date)]
        date: NaiveDate,

        #[command(flatten)]
        feed: FeedArgs,

        /// Write <prefix>-<date>.ics into the configured export directory
        #[arg(long)]
        export: bool,

        /// Print the .ics document instead of the day summary
        #[arg(long, conflicts_with = "export")]
        stdout: bool,
    },
    /// Category legend
    Categories,
    /// Show configuration paths and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = EngineConfig::load().context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Month { feed } => commands::month::run(&feed, &config),
        Commands::Week { feed } => commands::week::run(&feed, &config),
        Commands::List { feed } => commands::list::run(&feed, &config),
        Commands::Day {
            date,
            feed,
            export,
            stdout,
        } => commands::day::run(date, &feed, &config, export, stdout),
        Commands::Categories => commands::categories::run(),
        Commands::Config => commands::config::run(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
