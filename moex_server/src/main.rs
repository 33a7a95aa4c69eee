//! MOEX quote endpoint.
//!
//! This binary serves `GET /?action=quotes|history|search` over HTTP and answers each
//! request from the public MOEX ISS API. Internally, it wires together:
//!
//! - `IssClient`: the upstream client, one request per ISS lookup.
//! - `handler::router`: an axum router that parses the query into an `Action`,
//!   answers it through the upstream, and applies the CORS rules.
//! - The Ctrl+C signal, which drains in-flight requests and stops the server.
//!
//! Usage example (CLI):
//! ```bash
//! moex_server --bind 0.0.0.0:8088 --iss-url https://iss.moex.com/iss
//! curl 'http://127.0.0.1:8088/?action=quotes&tickers=SBER,GAZP'
//! ```
#![warn(missing_docs)]
use crate::args::Args;
use crate::handler::Endpoint;
use crate::iss::IssClient;
use clap::Parser;
use log::{error, info};
use moex_common::net::secs;
use moex_common::{MoexError, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

mod args;
mod handler;
mod iss;
pub mod model;

#[tokio::main]
async fn main() -> Result<(), MoexError> {
    init_logger();
    let args = Args::parse();

    let api = IssClient::new(&args.iss_url, secs(args.timeout_secs))?;
    info!("Proxying MOEX ISS at {}", args.iss_url);
    let app = handler::router(Arc::new(Endpoint::new(api)));

    let listener = TcpListener::bind(args.bind.as_str()).await?;
    info!("HTTP endpoint is started on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down endpoint..."),
        Err(e) => {
            error!("Error listening for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
