//! Application-level error types for Flydays.
//!
//! Each crate keeps its own detailed error enum. At the binary boundary they
//! are folded into [`AppError`], which knows how to describe itself to a user
//! without leaking request details.

pub use flydays_analysis::AnalysisError;
use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` for text shown to the user and `Display` for logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Analysis(e) => analysis_user_message(e),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Weather and geocoding service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Outside supported area: {0}")]
    OutsideCoverage(String),

    #[error("Weather API error: {0}")]
    ApiError(String),

    #[error("No weather data: {0}")]
    NoData(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Location not found. Check the name and try again.",
            WeatherError::InvalidCoordinates(_) => "Invalid coordinates provided.",
            WeatherError::InvalidRequest(_) => "Invalid request. Check the place name and try again.",
            WeatherError::OutsideCoverage(_) => {
                "Coordinates appear to be outside Norway. Please select a location within Norway."
            }
            WeatherError::ApiError(_) => "Weather service error. Please try again.",
            WeatherError::NoData(_) => {
                "No historical weather data available for this location and time period."
            }
        }
    }
}

/// User-facing text for a failed flight-day computation.
pub fn analysis_user_message(error: &AnalysisError) -> &'static str {
    match error {
        AnalysisError::InvalidInput(_) => "Invalid thresholds or weather data.",
        AnalysisError::NoData(_) => "No valid weather data found for analysis.",
        AnalysisError::Computation(_) => "Failed to analyze flight days. Please try again.",
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::from(NetworkError::Timeout),
            AppError::from(ConfigError::Invalid("test".into())),
            AppError::from(WeatherError::LocationNotFound("Atlantis".into())),
            AppError::from(AnalysisError::NoData("test".into())),
            AppError::from(std::io::Error::other("disk")),
            AppError::from(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = WeatherError::NoData("empty".into()).into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::NoData(_))));
    }

    #[test]
    fn test_outside_norway_message() {
        let app_err = AppError::Weather(WeatherError::OutsideCoverage("lat 40".into()));
        assert!(app_err.user_message().contains("outside Norway"));
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let upstream = NetworkError::ServerError {
            status: 503,
            message: "busy".into(),
        };
        let client = NetworkError::ServerError {
            status: 400,
            message: "bad".into(),
        };
        assert!(upstream.user_message().contains("later"));
        assert!(!client.user_message().contains("later"));
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = AppError::Analysis(AnalysisError::InvalidInput("maxRain negative".into()));
        assert!(err.to_string().contains("maxRain negative"));
    }
}
