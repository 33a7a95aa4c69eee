//!
//! Common types and logic shared by the MOEX endpoint server and the dashboard client.
//!
//! This crate aggregates:
//! - `error` — unified error type `MoexError` used across the workspace.
//! - `result` — handy `Result<T, MoexError>` alias.
//! - `tickers` — ticker identifiers and parsing helpers shared by both sides.
//! - `quote` — wire payloads: quotes, history candles, search results.
//! - `action` — the `?action=...` query contract of the endpoint.
//! - `signal` — quote classifier (signal label and strength tier).
//! - `portfolio` — holdings and derived profit/loss.
//! - `chart` — history to chart series projection.
//! - `fixtures` — static dashboard data (index card, patterns, signals, holdings).
//! - `net` — endpoint defaults and refresh constants.
#![warn(missing_docs)]
pub mod action;
pub mod chart;
pub mod error;
pub mod fixtures;
pub mod net;
pub mod portfolio;
pub mod quote;
pub mod result;
pub mod signal;
pub mod tickers;

pub use action::Action;
pub use error::MoexError;
pub use quote::{HistoryCandle, Quote};
pub use result::Result;
pub use tickers::Ticker;
