//! MOEX Dashboard: a terminal client that polls a quote endpoint and prints a
//! dashboard of live quotes with buy/sell/hold signals, detected patterns, a
//! portfolio profit/loss view and the recent history of the selected ticker.
//!
//! Usage example (CLI):
//! ```bash
//! moex_client --base-url http://127.0.0.1:8088/ --tickers SBER,GAZP,LKOH,YNDX --selected YNDX
//! moex_client --mock --interval-secs 5
//! ```
//!
//! While running, type a ticker to switch the chart, `refresh` to poll now,
//! `search <text>` to look up securities, or `quit` to exit.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info};
use moex_client::commands::spawn_stdin_reader;
use moex_client::render::DashboardView;
use moex_client::source::{HttpSource, MockSource, QuoteSource};
use moex_client::{Command, DashboardState, RefreshLoop};
use moex_common::fixtures::default_holdings;
use moex_common::net::secs;
use moex_common::portfolio::{Holding, read_holdings};
use moex_common::tickers::{self, TickerParser};
use moex_common::{MoexError, Result, Ticker};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<(), MoexError> {
    init_logger();
    let args = Args::parse();

    let tickers = load_tickers(&args)?;
    if tickers.is_empty() {
        return Err(MoexError::ParseTickers("no tickers to watch".to_string()));
    }
    let selected = args.selected.parse::<Ticker>()?;
    let holdings = load_holdings(args.portfolio.as_deref())?;
    info!("Tickers: {:?}", tickers);

    let source: Arc<dyn QuoteSource> = if args.mock {
        info!("Using generated offline data");
        Arc::new(MockSource::new())
    } else {
        info!("Using endpoint {}", args.base_url);
        Arc::new(HttpSource::new(&args.base_url, secs(args.timeout_secs))?)
    };

    let (command_tx, command_rx) = unbounded::<Command>();
    {
        let command_tx = command_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down dashboard...");
            let _ = command_tx.send(Command::Quit);
        })
        .map_err(|e| MoexError::Format(format!("Error setting Ctrl+C handler: {e}")))?;
    }
    spawn_stdin_reader(BufReader::new(io::stdin()), command_tx);

    let mut state = DashboardState::new(tickers, selected, args.history_days);
    let refresh = RefreshLoop::new(source, secs(args.interval_secs));
    info!("Dashboard is running. Type a ticker, `refresh`, `search <text>` or `quit`.");

    if let Err(e) = refresh.run(&mut state, &command_rx, |state| {
        println!("{}", DashboardView::build(state, &holdings));
    }) {
        error!("Refresh loop failed: {}", e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn load_tickers(args: &Args) -> Result<Vec<Ticker>, MoexError> {
    match &args.tickers_file {
        Some(raw) => {
            let file_path = normalize_path(raw);
            if !is_file_exist(&file_path) {
                return Err(MoexError::Format(format!(
                    "tickers file not found: {}",
                    file_path.display()
                )));
            }
            let file = File::open(file_path)?;
            Ticker::parse_from_file(BufReader::new(file))
        }
        None => tickers::parse_list(&args.tickers),
    }
}

fn load_holdings(path: Option<&str>) -> Result<Vec<Holding>, MoexError> {
    let Some(raw) = path else {
        return Ok(default_holdings());
    };
    let file_path = normalize_path(raw);
    if !is_file_exist(&file_path) {
        return Err(MoexError::Format(format!(
            "portfolio file not found: {}",
            file_path.display()
        )));
    }
    read_holdings(BufReader::new(File::open(file_path)?))
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
