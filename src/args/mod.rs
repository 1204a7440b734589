//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod tests;

pub use cli::LoadscopeArgs;

pub(crate) use defaults::DEFAULT_CONFIG_FILES;
#[cfg(test)]
pub(crate) use defaults::{DEFAULT_BACKEND_URL, default_charts_path};
pub(crate) use parsers::{parse_backend_url, parse_duration_arg};
