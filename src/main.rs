mod app;
mod args;
mod charts;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;
mod session;
mod shutdown;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
