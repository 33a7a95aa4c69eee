//! ISS data model and conversions for the endpoint.
//!
//! This module groups the types used to turn ISS answers into endpoint payloads:
//! - `table` — the column/row table layout every ISS block uses.
//! - `quote` — building a `Quote` from the `marketdata` and `securities` blocks.
//! - `candle` — building `HistoryCandle`s and search results from their blocks.

pub mod candle;
pub mod quote;
pub mod table;
