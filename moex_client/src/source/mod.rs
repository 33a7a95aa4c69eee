//! Where quotes and history come from.
//!
//! - `http` — the remote `?action=...` endpoint.
//! - `mock` — offline random-walk data seeded from the static signal table.
use moex_common::quote::SearchResult;
use moex_common::{HistoryCandle, Quote, Result, Ticker};

pub mod http;
pub mod mock;

pub use http::HttpSource;
pub use mock::MockSource;

/// A blocking provider of market data.
///
/// Implementations are called from fetch worker threads, possibly concurrently.
pub trait QuoteSource: Send + Sync {
    /// Current quotes for `tickers`. Tickers without data are left out.
    fn fetch_quotes(&self, tickers: &[Ticker]) -> Result<Vec<Quote>>;

    /// Daily candles for the trailing `days`, oldest first.
    fn fetch_history(&self, ticker: &Ticker, days: u32) -> Result<Vec<HistoryCandle>>;

    /// Securities matching `query`.
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
