//! Folding weather and analysis failures into [`AppError`] for the binary.

use flydays_core::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError as AppWeatherError,
};

use crate::types::WeatherError;

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::Network(err) => AppError::Network(err.into_network_error()),
            WeatherError::Api { status, message } if status >= 500 => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            WeatherError::Api { status, message } => {
                AppError::Weather(AppWeatherError::ApiError(format!("{}: {}", status, message)))
            }
            WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            WeatherError::NoData(s) => AppError::Weather(AppWeatherError::NoData(s)),
            WeatherError::InvalidCoordinates(s) => {
                AppError::Weather(AppWeatherError::InvalidCoordinates(s))
            }
            WeatherError::OutsideNorway {
                latitude,
                longitude,
            } => AppError::Weather(AppWeatherError::OutsideCoverage(format!(
                "{}, {}",
                latitude, longitude
            ))),
            WeatherError::LocationNotFound(s) => {
                AppError::Weather(AppWeatherError::LocationNotFound(s))
            }
            WeatherError::InvalidInput(s) => AppError::Weather(AppWeatherError::InvalidRequest(s)),
            WeatherError::Config(s) => AppError::Config(ConfigError::Invalid(s)),
            WeatherError::Analysis(inner) => AppError::Analysis(inner),
        }
    }
}
