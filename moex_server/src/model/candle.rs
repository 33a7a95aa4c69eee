//! History candles and search rows from ISS answers.
use chrono::NaiveDate;
use moex_common::HistoryCandle;
use moex_common::quote::SearchResult;
use serde_json::Value;

use crate::model::table::Table;

/// Security types surfaced by search.
pub const SHARE_TYPES: [&str; 2] = ["common_share", "preferred_share"];
/// Upper bound on search results.
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Daily candles from the `history` block, oldest first as ISS returns them.
///
/// Rows without a close or with an unparsable `TRADEDATE` are skipped.
pub fn history_from_answer(answer: &Value) -> Vec<HistoryCandle> {
    Table::from_block(answer, "history")
        .rows()
        .filter_map(|row| {
            let close = row.nonzero_f64("CLOSE")?;
            let date = row
                .str("TRADEDATE")
                .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())?;
            Some(HistoryCandle {
                date,
                open: row.f64("OPEN"),
                high: row.f64("HIGH"),
                low: row.f64("LOW"),
                close,
                volume: row.f64("VOLUME").unwrap_or(0.0),
            })
        })
        .collect()
}

/// Share rows from the `securities` block of a search answer.
pub fn search_from_answer(answer: &Value) -> Vec<SearchResult> {
    Table::from_block(answer, "securities")
        .rows()
        .filter_map(|row| {
            let kind = row.str("type").filter(|t| SHARE_TYPES.contains(t))?;
            Some(SearchResult {
                ticker: row.str("secid").unwrap_or_default().to_string(),
                name: row.str("shortname").map(str::to_string),
                full_name: row.str("name").map(str::to_string),
                kind: kind.to_string(),
                is_traded: row.f64("is_traded") == Some(1.0),
            })
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}
