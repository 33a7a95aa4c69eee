//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `MoexError`, so functions can simply return `Result<T>`.
use crate::error::MoexError;

/// Workspace-wide `Result` alias with `MoexError` as the default error.
pub type Result<T, E = MoexError> = std::result::Result<T, E>;
