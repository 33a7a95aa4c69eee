//! Blocking client for the quote endpoint.
use log::debug;
use moex_common::action::Action;
use moex_common::quote::{HistoryResponse, QuotesResponse, SearchResponse, SearchResult};
use moex_common::{HistoryCandle, MoexError, Quote, Result, Ticker};
use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::QuoteSource;

/// Talks to `GET {base}?action=...`.
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    /// Builds a source for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| MoexError::Format(format!("Invalid base url '{base_url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(MoexError::Format(format!(
                "Invalid base url '{base_url}': must be http or https"
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, client })
    }

    /// Full request URL for `action`.
    pub fn url_for(&self, action: &Action) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(action.to_query().iter().map(|(k, v)| (*k, v.as_str())));
        url
    }

    fn get<T: DeserializeOwned>(&self, action: &Action) -> Result<T> {
        let url = self.url_for(action);
        debug!("GET {url}");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.json::<T>()?)
    }
}

impl QuoteSource for HttpSource {
    fn fetch_quotes(&self, tickers: &[Ticker]) -> Result<Vec<Quote>> {
        let response: QuotesResponse = self.get(&Action::quotes(tickers))?;
        Ok(response.quotes)
    }

    fn fetch_history(&self, ticker: &Ticker, days: u32) -> Result<Vec<HistoryCandle>> {
        let response: HistoryResponse = self.get(&Action::history(ticker, days))?;
        response.into_result()
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response: SearchResponse = self.get(&Action::Search {
            query: query.to_string(),
        })?;
        Ok(response.results)
    }
}
