use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::session::TestParameters;

use super::defaults::{
    DEFAULT_BACKEND_URL, DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUESTS,
    default_charts_path,
};
use super::parsers::{parse_backend_url, parse_duration_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run a load test through a load-generation backend and watch throughput, error rate and response times stream in live."
)]
pub struct LoadscopeArgs {
    /// WebSocket endpoint of the load-generation backend
    #[arg(
        long,
        short = 'b',
        default_value = DEFAULT_BACKEND_URL,
        value_parser = parse_backend_url
    )]
    pub backend: Url,

    /// Target URL the backend should load test
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Number of requests to send (1..=10000)
    #[arg(long, short = 'n', default_value_t = DEFAULT_REQUESTS)]
    pub requests: u64,

    /// Number of concurrent requests (1..=500)
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: u64,

    /// Timeout for establishing the backend connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = DEFAULT_CONNECT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Path to config file (TOML/JSON). Defaults to ./loadscope.toml or ./loadscope.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Path to save charts to
    #[arg(long = "charts-path", default_value_t = default_charts_path())]
    pub charts_path: String,

    /// Skip chart export after a completed run
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Write the final result as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Do not print the final summary block
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADSCOPE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl LoadscopeArgs {
    /// Session parameters as given; range checks happen when the session starts.
    #[must_use]
    pub fn test_parameters(&self) -> TestParameters {
        TestParameters::new(
            self.url.clone().unwrap_or_default(),
            self.requests,
            self.concurrency,
        )
    }
}
