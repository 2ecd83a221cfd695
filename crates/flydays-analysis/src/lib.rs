//! Flight-day statistics for Flydays
//!
//! Takes a multi-year daily weather series (precipitation, mean wind, gusts)
//! and a set of [`Thresholds`], and reports how many days per year a drone
//! could have flown, plus the mean and spread across years.
//!
//! Everything here is pure and synchronous. Fetching the series is the job
//! of `flydays-weather`.

pub mod error;
pub mod evaluator;
pub mod grouping;
pub mod statistics;
pub mod types;
pub mod units;

pub use error::AnalysisError;
pub use evaluator::count_flight_days;
pub use grouping::{group_by_year, group_series, ingest, YearBuckets};
pub use statistics::{summarize, yearly_statistic, CrossYearSummary};
pub use types::*;

/// Run the whole pipeline over one raw series.
///
/// Fails with [`AnalysisError::NoData`] rather than returning an empty
/// summary when the series has no days.
pub fn analyze(
    location: Coordinates,
    series: &RawDailySeries,
    thresholds: Thresholds,
) -> Result<AnalysisResult, AnalysisError> {
    thresholds.validate()?;

    let records = ingest(series)?;
    if records.is_empty() {
        return Err(AnalysisError::no_data(
            "no historical weather data available for this location and time period",
        ));
    }

    let buckets = group_by_year(records)?;
    if buckets.is_empty() {
        return Err(AnalysisError::no_data(
            "no valid weather data found for analysis",
        ));
    }

    let yearly_statistics = buckets
        .values()
        .map(|bucket| yearly_statistic(bucket, &thresholds))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = summarize(&yearly_statistics)?;

    tracing::debug!(
        years = summary.years_analyzed,
        days = summary.total_days_analyzed,
        average = summary.average_flight_days,
        "Flight-day analysis complete"
    );

    Ok(AnalysisResult {
        location,
        thresholds,
        average_flight_days: summary.average_flight_days,
        standard_deviation: summary.standard_deviation,
        yearly_data: summary.yearly_data,
        yearly_statistics,
        total_days_analyzed: summary.total_days_analyzed,
        years_analyzed: summary.years_analyzed,
    })
}
