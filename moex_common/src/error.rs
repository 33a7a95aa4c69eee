//! Error types shared between the endpoint server and the dashboard client.
//!
//! The `MoexError` enum unifies common failure cases for I/O, HTTP transport,
//! serialization, channel communication, and internal logic, allowing crates to
//! propagate a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by server and client.
#[derive(Error, Debug)]
pub enum MoexError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// HTTP transport failure or non-success status reported by `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error while parsing a ticker list into `Ticker` values.
    #[error("Parse tickers error: {0}")]
    ParseTickers(String),

    /// Upstream answered, but the payload misses data we depend on.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for MoexError {
    fn from(err: PoisonError<T>) -> Self {
        MoexError::MutexLock(err.to_string())
    }
}
