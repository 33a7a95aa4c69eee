//! Wire payloads exchanged between the endpoint and the dashboard.
//!
//! Field names follow the endpoint's JSON (`changePercent`, `isTraded`, ...). Every
//! response envelope defaults a missing collection key to an empty collection, so a
//! partial answer is never an error.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MoexError;
use crate::tickers::Ticker;

/// Latest price/volume snapshot for a single ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Instrument identifier.
    pub ticker: Ticker,
    /// Short human-readable name (falls back to the ticker).
    pub name: String,
    /// Last traded price.
    pub price: f64,
    /// Absolute change against the previous close.
    #[serde(default)]
    pub change: f64,
    /// Percent change against the previous close, rounded to two decimals.
    #[serde(default)]
    pub change_percent: f64,
    /// Volume traded today.
    #[serde(default)]
    pub volume: u64,
    /// Session high, absent outside trading hours.
    #[serde(default)]
    pub high: Option<f64>,
    /// Session low, absent outside trading hours.
    #[serde(default)]
    pub low: Option<f64>,
    /// Session open, absent outside trading hours.
    #[serde(default)]
    pub open: Option<f64>,
}

/// One daily OHLCV bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryCandle {
    /// Trade date, `YYYY-MM-DD` on the wire.
    pub date: NaiveDate,
    /// Opening price.
    #[serde(default)]
    pub open: Option<f64>,
    /// Highest price.
    #[serde(default)]
    pub high: Option<f64>,
    /// Lowest price.
    #[serde(default)]
    pub low: Option<f64>,
    /// Closing price.
    pub close: f64,
    /// Number of shares traded.
    #[serde(default)]
    pub volume: f64,
}

/// Security found by the search action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Security identifier (SECID).
    pub ticker: String,
    /// Short name.
    pub name: Option<String>,
    /// Full registered name.
    pub full_name: Option<String>,
    /// ISS security type, e.g. `common_share`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the security currently trades.
    pub is_traded: bool,
}

/// Envelope of `action=quotes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotesResponse {
    /// Quotes, one per ticker.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

/// Envelope of `action=history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Ticker the history belongs to; older endpoints omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<Ticker>,
    /// Candles, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryCandle>,
    /// Upstream failure description, reported alongside an empty history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryResponse {
    /// Candles of a successful answer; an answer carrying `error` is a failed fetch.
    pub fn into_result(self) -> Result<Vec<HistoryCandle>, MoexError> {
        match self.error {
            Some(error) => Err(MoexError::Upstream(error)),
            None => Ok(self.history),
        }
    }
}

/// Envelope of `action=search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching shares, at most 20.
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Upstream failure description, reported alongside empty results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of every non-2xx endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub error: String,
}

/// Percent change of `last` against `prev`, rounded to two decimals; `0` when `prev` is zero.
pub fn percent_change(last: f64, prev: f64) -> f64 {
    if prev == 0.0 {
        return 0.0;
    }
    ((last - prev) / prev * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_rounds_to_cents() {
        assert_eq!(percent_change(295.4, 288.77), 2.3);
        assert_eq!(percent_change(100.0, 100.0), 0.0);
        assert_eq!(percent_change(5.0, 0.0), 0.0);
        assert_eq!(percent_change(98.0, 100.0), -2.0);
    }

    #[test]
    fn missing_collection_keys_are_empty() {
        let quotes: QuotesResponse = serde_json::from_str("{}").unwrap();
        assert!(quotes.quotes.is_empty());
        let history: HistoryResponse = serde_json::from_str(r#"{"ticker":"SBER"}"#).unwrap();
        assert!(history.history.is_empty());
        assert_eq!(history.ticker, Some(Ticker::from("SBER")));
    }

    #[test]
    fn history_error_body_is_a_failure() {
        let failed: HistoryResponse =
            serde_json::from_str(r#"{"ticker":"GAZP","history":[],"error":"ISS timeout"}"#).unwrap();
        assert!(matches!(failed.into_result(), Err(MoexError::Upstream(msg)) if msg == "ISS timeout"));

        let empty: HistoryResponse = serde_json::from_str(r#"{"ticker":"GAZP","history":[]}"#).unwrap();
        assert!(empty.into_result().unwrap().is_empty());
    }

    #[test]
    fn decodes_endpoint_quote() {
        let raw = r#"{"ticker":"SBER","name":"Сбербанк","price":295.4,"change":6.64,
            "changePercent":2.3,"volume":1200,"high":296.0,"low":null,"open":289.0}"#;
        let quote: Quote = serde_json::from_str(raw).unwrap();
        assert_eq!(quote.ticker, Ticker::from("SBER"));
        assert_eq!(quote.change_percent, 2.3);
        assert_eq!(quote.low, None);
        assert_eq!(quote.open, Some(289.0));
    }

    #[test]
    fn candle_date_is_plain_calendar_date() {
        let candle: HistoryCandle = serde_json::from_str(
            r#"{"date":"2024-03-01","open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":1000}"#,
        )
        .unwrap();
        assert_eq!(candle.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let back = serde_json::to_value(&candle).unwrap();
        assert_eq!(back["date"], "2024-03-01");
    }

    #[test]
    fn search_result_uses_type_key() {
        let json = serde_json::to_value(SearchResult {
            ticker: "SBER".into(),
            name: Some("Сбербанк".into()),
            full_name: None,
            kind: "common_share".into(),
            is_traded: true,
        })
        .unwrap();
        assert_eq!(json["type"], "common_share");
        assert_eq!(json["isTraded"], true);
        assert!(json.get("fullName").is_some());
    }
}
