//! Ticker identifiers and helpers shared between server and client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::MoexError;

/// Tickers the dashboard watches when nothing else is configured.
pub const DEFAULT_TICKERS: [&str; 4] = ["SBER", "GAZP", "LKOH", "YNDX"];

/// Ticker selected on startup and used by the history action by default.
pub const DEFAULT_SELECTED: &str = "YNDX";

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces, or new lines. Empty items and
    /// repeated symbols are skipped. Returns an error if any item cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, MoexError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, MoexError> {
        let mut joined = String::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(MoexError::Io)?;
            joined.push_str(line.trim());
            joined.push('\n');
        }
        parse_list(&joined)
    }
}

/// Parses a comma/whitespace separated list such as `SBER,GAZP LKOH`.
///
/// Duplicates are dropped, first occurrence wins.
pub fn parse_list(raw: &str) -> Result<Vec<Ticker>, MoexError> {
    let mut tickers: Vec<Ticker> = Vec::new();
    for item in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        if item.is_empty() {
            continue;
        }
        let ticker = item.parse::<Ticker>()?;
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
        }
    }
    Ok(tickers)
}

/// The built-in watch list.
pub fn default_tickers() -> Vec<Ticker> {
    DEFAULT_TICKERS.iter().map(|t| Ticker(t.to_string())).collect()
}

/// Exchange instrument identifier, stored upper case (e.g. `SBER`).
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Borrow the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = MoexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoexError::ParseTickers("empty ticker".to_string()));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MoexError::ParseTickers(format!("invalid ticker: {trimmed}")));
        }
        Ok(Ticker(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Ticker {
    type Error = MoexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Ticker {
    /// Infallible conversion for literals; prefer `parse` for user input.
    fn from(value: &str) -> Self {
        Ticker(value.trim().to_ascii_uppercase())
    }
}
