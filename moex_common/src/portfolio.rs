//! Portfolio holdings and derived profit/loss.
//!
//! Holdings are static configuration. Current price, profit/loss and the totals are
//! recomputed from the latest quotes every time they are needed and never stored.
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::error::MoexError;
use crate::quote::Quote;
use crate::tickers::Ticker;

/// A position: share count and average cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Instrument held.
    pub ticker: Ticker,
    /// Whole shares held.
    pub shares: u64,
    /// Average purchase price per share.
    pub avg_price: f64,
}

/// One holding joined with the quote it is priced against.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The configured holding.
    pub holding: Holding,
    /// Latest price, or the average cost while no quote has arrived.
    pub current: f64,
    /// `(current - avg_price) * shares`.
    pub profit_loss: f64,
    /// `shares * current`.
    pub market_value: f64,
}

/// Totals over every position.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    /// Per-holding breakdown in configuration order.
    pub positions: Vec<Position>,
    /// Sum of per-holding profit/loss.
    pub total_profit_loss: f64,
    /// Sum of per-holding market value.
    pub total_value: f64,
}

impl Holding {
    /// Creates a holding.
    pub fn new(ticker: &str, shares: u64, avg_price: f64) -> Self {
        Holding {
            ticker: Ticker::from(ticker),
            shares,
            avg_price,
        }
    }

    /// Prices this holding against `quotes`.
    pub fn position(&self, quotes: &[Quote]) -> Position {
        let current = quotes
            .iter()
            .find(|q| q.ticker == self.ticker)
            .map(|q| q.price)
            .unwrap_or(self.avg_price);
        let shares = self.shares as f64;
        Position {
            holding: self.clone(),
            current,
            profit_loss: (current - self.avg_price) * shares,
            market_value: shares * current,
        }
    }
}

impl PortfolioSummary {
    /// Evaluates all `holdings` against `quotes`.
    pub fn evaluate(holdings: &[Holding], quotes: &[Quote]) -> Self {
        let positions: Vec<Position> = holdings.iter().map(|h| h.position(quotes)).collect();
        let total_profit_loss = positions.iter().map(|p| p.profit_loss).sum();
        let total_value = positions.iter().map(|p| p.market_value).sum();
        PortfolioSummary {
            positions,
            total_profit_loss,
            total_value,
        }
    }
}

/// Reads holdings from a JSON array such as `[{"ticker":"SBER","shares":100,"avgPrice":280.5}]`.
pub fn read_holdings<R: Read>(reader: R) -> Result<Vec<Holding>, MoexError> {
    let holdings: Vec<Holding> = serde_json::from_reader(reader)?;
    if let Some(bad) = holdings.iter().find(|h| !h.avg_price.is_finite() || h.avg_price < 0.0) {
        return Err(MoexError::Format(format!(
            "invalid average price for {}: {}",
            bad.ticker, bad.avg_price
        )));
    }
    Ok(holdings)
}
