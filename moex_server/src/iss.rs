//! Upstream access to the MOEX Informational & Statistical Server.
//!
//! [`IssApi`] is the raw seam (path + query in, JSON answer out); the free functions
//! on top of it implement the three lookups the endpoint serves.
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use moex_common::quote::SearchResult;
use moex_common::{HistoryCandle, MoexError, Quote, Result, Ticker};
use reqwest::{Client, Url};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::model::{candle, quote};

/// Board all share lookups go through.
const SHARES_BOARD: &str = "/engines/stock/markets/shares/boards/TQBR/securities";

/// Raw ISS access.
pub trait IssApi: Send + Sync + 'static {
    /// GETs `{iss}{path}` with `params` and returns the decoded answer.
    fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// `reqwest` client for ISS.
pub struct IssClient {
    base_url: String,
    client: Client,
}

impl IssClient {
    /// Creates a client rooted at `base_url` (e.g. `https://iss.moex.com/iss`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(MoexError::Format(format!(
                "Invalid ISS url: must start with http:// or https://, got: '{base_url}'"
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Full URL of `path` with `params`.
    pub fn url_for(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| MoexError::Format(format!("Invalid ISS url {raw}: {e}")))
    }
}

impl IssApi for IssClient {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.url_for(path, params)?;
        debug!("ISS GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

/// Quotes for `tickers` in request order, skipping tickers ISS cannot price.
pub async fn quotes<A: IssApi>(api: &A, tickers: &[Ticker]) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        let path = format!("{SHARES_BOARD}/{ticker}.json");
        match api.get(&path, &[]).await {
            Ok(answer) => match quote::from_security_answer(ticker, &answer) {
                Some(quote) => quotes.push(quote),
                None => debug!("No price for {ticker}, skipped"),
            },
            Err(e) => warn!("Quote lookup for {ticker} failed: {e}"),
        }
    }
    quotes
}

/// Daily candles of `ticker` over `[today - days, today]`.
///
/// A window reaching past the earliest representable date is a `Format` error.
pub async fn history<A: IssApi>(
    api: &A,
    ticker: &Ticker,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<HistoryCandle>> {
    let from = today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| MoexError::Format(format!("Invalid days: {days} is out of range")))?;
    let params = [
        ("from", from.format("%Y-%m-%d").to_string()),
        ("till", today.format("%Y-%m-%d").to_string()),
        ("start", "0".to_string()),
    ];
    let answer = api
        .get(&format!("/history{SHARES_BOARD}/{ticker}.json"), &params)
        .await?;
    Ok(candle::history_from_answer(&answer))
}

/// Share search by name or ticker.
pub async fn search<A: IssApi>(api: &A, query: &str) -> Result<Vec<SearchResult>> {
    let answer = api
        .get("/securities.json", &[("q", query.to_string())])
        .await?;
    Ok(candle::search_from_answer(&answer))
}
