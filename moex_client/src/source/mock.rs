//! Offline data source.
//!
//! Quotes follow a small random walk around the prices of the static signal table
//! (tickers outside the table start at 100). History is synthesised backwards from
//! today with the same walk. Nothing here touches the network, which makes the
//! dashboard usable as a demo and keeps tests hermetic.
use chrono::{Days, Local};
use moex_common::fixtures::{self, SIGNALS};
use moex_common::quote::{SearchResult, percent_change};
use moex_common::{HistoryCandle, Quote, Result, Ticker};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;

const INITIAL_PRICE: f64 = 100.0;
/// Longest synthetic history, about ten years of days.
const MAX_HISTORY_DAYS: u32 = 3660;

/// Random-walk quote generator.
pub struct MockSource {
    /// Last emitted price per ticker.
    prices: Mutex<HashMap<Ticker, f64>>,
}

impl MockSource {
    /// Creates a generator with no price history.
    pub fn new() -> Self {
        Self {
            prices: Mutex::new(HashMap::new()),
        }
    }

    /// Calculate the next synthetic price using a small random walk around `current_price`.
    ///
    /// The change is sampled uniformly from `[-1%, +1%]` and the result is clamped to a
    /// minimum positive value.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_price = current_price * (1.0 + change);
        new_price.max(0.01)
    }

    fn base_price(ticker: &Ticker) -> f64 {
        fixtures::reference_price(ticker).unwrap_or(INITIAL_PRICE)
    }

    fn generate_quote(ticker: &Ticker, previous: f64) -> Quote {
        let mut rng = rand::rng();
        let base = Self::base_price(ticker);
        let price = Self::next_price(previous);
        let spread = price * 0.005;
        Quote {
            ticker: ticker.clone(),
            name: ticker.to_string(),
            price,
            change: price - base,
            change_percent: percent_change(price, base),
            volume: 1000 + rng.random_range(0..50_000),
            high: Some(price.max(base) + spread),
            low: Some(price.min(base) - spread),
            open: Some(base),
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl super::QuoteSource for MockSource {
    fn fetch_quotes(&self, tickers: &[Ticker]) -> Result<Vec<Quote>> {
        let mut prices = self.prices.lock()?;
        let quotes = tickers
            .iter()
            .map(|ticker| {
                let previous = prices
                    .get(ticker)
                    .copied()
                    .unwrap_or_else(|| Self::base_price(ticker));
                let quote = Self::generate_quote(ticker, previous);
                prices.insert(ticker.clone(), quote.price);
                quote
            })
            .collect();
        Ok(quotes)
    }

    fn fetch_history(&self, ticker: &Ticker, days: u32) -> Result<Vec<HistoryCandle>> {
        let today = Local::now().date_naive();
        let mut rng = rand::rng();
        let mut close = Self::base_price(ticker);
        let days = days.min(MAX_HISTORY_DAYS);
        let mut candles = Vec::with_capacity(days as usize);

        for back in 0..days {
            let Some(date) = today.checked_sub_days(Days::new(u64::from(back))) else {
                break;
            };
            let open = Self::next_price(close);
            candles.push(HistoryCandle {
                date,
                open: Some(open),
                high: Some(open.max(close) * 1.004),
                low: Some(open.min(close) * 0.996),
                close,
                volume: rng.random_range(100_000.0..5_000_000.0),
            });
            close = open;
        }
        candles.reverse();
        Ok(candles)
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let needle = query.trim().to_ascii_uppercase();
        Ok(SIGNALS
            .iter()
            .filter(|s| !needle.is_empty() && s.ticker.contains(&needle))
            .map(|s| SearchResult {
                ticker: s.ticker.to_string(),
                name: Some(s.ticker.to_string()),
                full_name: None,
                kind: "common_share".to_string(),
                is_traded: true,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::QuoteSource;
    use chrono::NaiveDate;

    fn window_start(days: u32) -> Option<NaiveDate> {
        Local::now()
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
    }

    #[test]
    fn next_price_stays_within_one_percent() {
        for _ in 0..100 {
            let next = MockSource::next_price(200.0);
            assert!((198.0..=202.0).contains(&next));
        }
        assert!(MockSource::next_price(0.0) >= 0.01);
    }

    #[test]
    fn quotes_follow_requested_order() {
        let source = MockSource::new();
        let tickers = vec![Ticker::from("YNDX"), Ticker::from("SBER"), Ticker::from("AFLT")];
        let quotes = source.fetch_quotes(&tickers).unwrap();
        let order: Vec<&Ticker> = quotes.iter().map(|q| &q.ticker).collect();
        assert_eq!(order, tickers.iter().collect::<Vec<_>>());
        assert!((quotes[1].price - 295.4).abs() <= 295.4 * 0.01);
        assert!((quotes[2].price - 100.0).abs() <= 1.0);
    }

    #[test]
    fn walk_continues_from_last_price() {
        let source = MockSource::new();
        let sber = [Ticker::from("SBER")];
        let first = source.fetch_quotes(&sber).unwrap()[0].price;
        let second = source.fetch_quotes(&sber).unwrap()[0].price;
        assert!((second - first).abs() <= first * 0.01);
    }

    #[test]
    fn history_is_oldest_first_and_ends_today() {
        let source = MockSource::new();
        let history = source.fetch_history(&Ticker::from("GAZP"), 30).unwrap();
        assert_eq!(history.len(), 30);
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(Some(history[0].date), window_start(30));
        assert_eq!(history.last().unwrap().close, 167.2);
    }

    #[test]
    fn huge_window_is_capped() {
        let source = MockSource::new();
        let history = source.fetch_history(&Ticker::from("SBER"), u32::MAX).unwrap();
        assert_eq!(history.len(), MAX_HISTORY_DAYS as usize);
        assert_eq!(history.last().unwrap().date, Local::now().date_naive());
    }

    #[test]
    fn search_matches_static_tickers() {
        let source = MockSource::new();
        let found = source.search("ros").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ticker, "ROSN");
        assert!(source.search("  ").unwrap().is_empty());
    }
}
