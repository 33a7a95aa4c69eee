//! Command-line arguments for the dashboard client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use moex_common::action::DEFAULT_HISTORY_DAYS;
use moex_common::net::{DEFAULT_BASE_URL, HTTP_TIMEOUT_SECS, POLL_INTERVAL_SECS};
use moex_common::tickers::DEFAULT_SELECTED;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the quote endpoint (`{base}?action=quotes|history|search`).
    #[clap(long, env = "MOEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Tickers to watch, separated by commas or spaces.
    #[clap(long, default_value = "SBER,GAZP,LKOH,YNDX")]
    pub tickers: String,

    /// Path to a text file with tickers; overrides `--tickers`.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub tickers_file: Option<String>,

    /// Ticker whose history is shown on startup.
    #[clap(long, default_value = DEFAULT_SELECTED)]
    pub selected: String,

    /// Seconds between two quote polls.
    #[clap(long, env = "MOEX_POLL_SECS", default_value_t = POLL_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Trailing window of the history chart, in days.
    #[clap(long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub history_days: u32,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// JSON file with holdings (`[{"ticker":"SBER","shares":100,"avgPrice":280.5}]`).
    #[clap(long)]
    pub portfolio: Option<String>,

    /// Use generated offline data instead of the endpoint.
    #[clap(long)]
    pub mock: bool,
}
