//! Command-line arguments for the endpoint server.
use clap::Parser;
use moex_common::net::{DEFAULT_BIND, HTTP_TIMEOUT_SECS, ISS_BASE_URL};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, env = "MOEX_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Root of the MOEX ISS API.
    #[clap(long, default_value = ISS_BASE_URL)]
    pub iss_url: String,

    /// Upstream request timeout in seconds.
    #[clap(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}
