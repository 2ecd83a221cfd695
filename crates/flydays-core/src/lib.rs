pub mod config;
pub mod error;

pub use config::{
    ArchiveConfig, Config, GeocodingConfig, HttpConfig, ThresholdsConfig, ValidationResult,
};
pub use error::{
    analysis_user_message, AnalysisError, AppError, ConfigError, NetworkError, ReqwestErrorExt,
    WeatherError,
};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Flydays core initialized");
    Ok(())
}
