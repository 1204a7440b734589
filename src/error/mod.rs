mod app;
mod config;
mod metrics;
mod session;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use metrics::MetricsError;
pub use session::{ProtocolError, SessionError, TransportError};
pub use validation::{ParameterField, ValidationError};
