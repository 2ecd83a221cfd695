//! Error types for the flight-day computation.

use thiserror::Error;

/// Failures raised by the analysis pipeline.
///
/// Every variant is fatal to the current analysis; nothing is retried and no
/// partial result is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Thresholds or the daily series are malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The series held no records, or a year bucket came out empty.
    #[error("No data: {0}")]
    NoData(String),

    /// An aggregate produced a non-finite value.
    #[error("Computation error: {0}")]
    Computation(String),
}

impl AnalysisError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }
}
