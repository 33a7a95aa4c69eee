//! MOEX dashboard client.
//!
//! Polls a quote endpoint, keeps the view state consistent with the latest completed
//! fetches and renders a plain-text dashboard:
//! - `state` — the view state and its event-driven transition function.
//! - `refresh` — the session loop: poll timer, fetch workers, command handling.
//! - `source` — quote providers (remote endpoint or offline generator).
//! - `render` — derived aggregates and text output.
//! - `commands` — stdin command parsing.
#![warn(missing_docs)]
pub mod commands;
pub mod refresh;
pub mod render;
pub mod source;
pub mod state;

pub use refresh::{Command, PollTimer, RefreshLoop};
pub use state::{DashboardState, Effect, Event};
