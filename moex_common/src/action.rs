//! Query contract of the quote endpoint.
//!
//! An `Action` is what a single `GET {base}?action=...` request asks for. The client
//! turns an `Action` into query pairs; the server parses the pairs back, filling in the
//! same defaults the endpoint has always used for missing parameters.
use crate::error::MoexError;
use crate::tickers::{self, DEFAULT_SELECTED, Ticker};

/// Query key selecting the action.
pub const ACTION_KEY: &str = "action";
/// Trailing window used when `days` is not given.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Request payload understood by the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Current quotes for a set of tickers.
    Quotes {
        /// Requested tickers; the endpoint answers in the same order.
        tickers: Vec<Ticker>,
    },
    /// Daily candles for one ticker over a trailing window.
    History {
        /// Instrument to load.
        ticker: Ticker,
        /// Window length in calendar days.
        days: u32,
    },
    /// Free-text security search.
    Search {
        /// Search text, passed through to ISS.
        query: String,
    },
}

impl Action {
    /// Creates a quotes request.
    pub fn quotes(tickers: &[Ticker]) -> Self {
        Action::Quotes {
            tickers: tickers.to_vec(),
        }
    }

    /// Creates a history request.
    pub fn history(ticker: &Ticker, days: u32) -> Self {
        Action::History {
            ticker: ticker.clone(),
            days,
        }
    }

    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Quotes { .. } => "quotes",
            Action::History { .. } => "history",
            Action::Search { .. } => "search",
        }
    }

    /// Query pairs to append to the endpoint base URL.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(ACTION_KEY, self.name().to_string())];
        match self {
            Action::Quotes { tickers } => {
                let joined: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
                pairs.push(("tickers", joined.join(",")));
            }
            Action::History { ticker, days } => {
                pairs.push(("ticker", ticker.to_string()));
                pairs.push(("days", days.to_string()));
            }
            Action::Search { query } => pairs.push(("q", query.clone())),
        }
        pairs
    }

    /// Parses decoded query pairs.
    ///
    /// Missing parameters take the endpoint defaults: `action=quotes`, the default
    /// watch list, `ticker=YNDX`, `days=30`, empty search text. Returns `Ok(None)`
    /// for an unknown action.
    pub fn from_query<'a, I>(pairs: I) -> Result<Option<Self>, MoexError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut action = None;
        let mut tickers_raw = None;
        let mut ticker_raw = None;
        let mut days_raw = None;
        let mut query = None;

        for (key, value) in pairs {
            match key {
                ACTION_KEY => action = Some(value),
                "tickers" => tickers_raw = Some(value),
                "ticker" => ticker_raw = Some(value),
                "days" => days_raw = Some(value),
                "q" => query = Some(value),
                _ => {}
            }
        }

        let parsed = match action.unwrap_or("quotes") {
            "quotes" => {
                let tickers = match tickers_raw {
                    Some(raw) => tickers::parse_list(raw)?,
                    None => tickers::default_tickers(),
                };
                Action::Quotes { tickers }
            }
            "history" => {
                let ticker = ticker_raw.unwrap_or(DEFAULT_SELECTED).parse::<Ticker>()?;
                let days = match days_raw {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| MoexError::Format(format!("Invalid days: {raw}: {e}")))?,
                    None => DEFAULT_HISTORY_DAYS,
                };
                Action::History { ticker, days }
            }
            "search" => Action::Search {
                query: query.unwrap_or_default().to_string(),
            },
            _ => return Ok(None),
        };
        Ok(Some(parsed))
    }
}
