//! Pitchfork review CLI
//!
//! Prints search results, reviews and sentiment statistics as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pitchfork_reviews::{
    ReviewClient,
    error::Result,
    models::{Config, LoggingConfig, Review, ReviewSummary},
};
use serde::Serialize;

/// Pitchfork album reviews with sentiment analysis
#[derive(Parser, Debug)]
#[command(
    name = "pitchfork",
    version,
    about = "Search and analyze Pitchfork album reviews"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "pitchfork.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Bypass the disk cache for this run
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search album reviews
    Search {
        /// Free-text query
        query: String,
    },

    /// Fetch a single review by URL
    Review {
        url: String,

        /// Skip sentiment analysis
        #[arg(long)]
        no_sentiment: bool,
    },

    /// Fetch the most recent reviews
    Latest {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Skip sentiment analysis
        #[arg(long)]
        no_sentiment: bool,
    },

    /// Sentiment statistics over the most recent reviews
    Stats {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Remove every cached entry
    ClearCache,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging; `--verbose` wins over the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Peek at the level first so load warnings reach a live logger.
    let level = Config::load(&cli.config)
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| LoggingConfig::default().level);
    init_logging(cli.verbose, &level);

    let mut config = Config::load_or_default(&cli.config);
    if cli.no_cache {
        config.cache.enabled = false;
    }

    if let Command::Validate = cli.command {
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("Config OK");
        return Ok(());
    }

    config.validate()?;
    let client = ReviewClient::from_config(&config)?;

    match cli.command {
        Command::Search { query } => {
            print_json(&client.search_albums(&query)?)?;
        }

        Command::Review { url, no_sentiment } => {
            print_json(&client.get_review(&url, !no_sentiment)?)?;
        }

        Command::Latest {
            count,
            no_sentiment,
        } => {
            let reviews = client.get_latest_reviews(count, !no_sentiment)?;
            let summaries: Vec<ReviewSummary> = reviews.iter().map(Review::summary).collect();
            print_json(&summaries)?;
        }

        Command::Stats { count } => {
            let reviews = client.get_latest_reviews(count, true)?;
            match client.summary_stats(&reviews) {
                Some(summary) => print_json(&summary)?,
                None => log::warn!("No scored reviews to summarize"),
            }
        }

        Command::ClearCache => {
            if client.clear_cache() {
                log::info!("Cache cleared");
            }
        }

        Command::Validate => {}
    }

    Ok(())
}
