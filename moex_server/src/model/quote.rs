//! Quote built from an ISS security answer.
//!
//! The `marketdata` block carries the live numbers, the `securities` block the names.
//! `LAST` falls back to `CURRENTVALUE` and the previous close `PREVPRICE` falls back to
//! the last price, so an instrument without a previous close reports no change.

use moex_common::quote::percent_change;
use moex_common::{Quote, Ticker};
use serde_json::Value;

use crate::model::table::Table;

/// Builds the quote for `ticker`, or `None` when ISS has no price for it.
pub fn from_security_answer(ticker: &Ticker, answer: &Value) -> Option<Quote> {
    let marketdata = Table::from_block(answer, "marketdata");
    let market = marketdata.first_row()?;
    let last = market
        .nonzero_f64("LAST")
        .or_else(|| market.nonzero_f64("CURRENTVALUE"))?;
    let prev = market.nonzero_f64("PREVPRICE").unwrap_or(last);

    let securities = Table::from_block(answer, "securities");
    let name = securities
        .first_row()
        .and_then(|row| row.str("SHORTNAME"))
        .unwrap_or(ticker.as_str())
        .to_string();

    Some(Quote {
        ticker: ticker.clone(),
        name,
        price: last,
        change: last - prev,
        change_percent: percent_change(last, prev),
        volume: market.f64("VOLTODAY").map(|v| v.max(0.0) as u64).unwrap_or(0),
        high: market.f64("HIGH"),
        low: market.f64("LOW"),
        open: market.f64("OPEN"),
    })
}
