//! Replay scripted offer feeds through a driver session.
//!
//! `generate` writes a deterministic demo feed; `replay` runs a feed and
//! prints a JSON report of what the session did.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use captain_core::policy::OfferPolicy;

mod channel;
mod feed;
mod generate;
mod replay;

#[derive(Parser)]
#[command(
    name = "captain_replay",
    about = "Replay scripted ride-offer feeds through a driver session"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a feed file and print the session report as JSON
    Replay {
        /// Path to a JSON feed file
        feed: PathBuf,
        /// Seconds the session keeps running after the last event
        #[arg(long, default_value_t = 35)]
        settle_secs: u64,
        /// Offer countdown window in seconds
        #[arg(long, default_value_t = 30)]
        window_secs: u32,
    },
    /// Generate a deterministic demo feed
    Generate {
        /// Output file path
        #[arg(long, default_value = "feed.json")]
        output: PathBuf,
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of offers in the feed
        #[arg(long, default_value_t = 10)]
        offers: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Replay {
            feed,
            settle_secs,
            window_secs,
        } => {
            let events = feed::load_feed(&feed)?;
            let policy = OfferPolicy {
                countdown_window_secs: window_secs,
                ..Default::default()
            };
            let report = replay::run_feed(&events, policy, settle_secs);
            let rendered =
                serde_json::to_string_pretty(&report).context("serializing replay report")?;
            println!("{rendered}");
        }
        Commands::Generate {
            output,
            seed,
            offers,
        } => {
            let events = generate::generate_feed(seed, offers);
            feed::save_feed(&output, &events)?;
            tracing::info!(
                path = %output.display(),
                events = events.len(),
                offers,
                seed,
                "feed written"
            );
        }
    }
    Ok(())
}
