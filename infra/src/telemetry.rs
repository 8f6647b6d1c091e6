//! Tracing subscriber setup

use otp_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::InfrastructureError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level: {}", e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let source = config.source_location;

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_file(source).with_line_number(source))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_file(source).with_line_number(source))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_file(source).with_line_number(source))
            .try_init(),
    };

    result.map_err(|e| InfrastructureError::Config(format!("Failed to install subscriber: {}", e)))
}
