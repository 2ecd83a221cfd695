//! Per-year aggregates and the cross-year summary.

use crate::error::AnalysisError;
use crate::evaluator::count_flight_days;
use crate::types::{Thresholds, YearBucket, YearlyStatistic};

/// Round half-up to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N); `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

fn finite(value: f64, what: &str, year: i32) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::computation(format!(
            "{} for {} is not finite",
            what, year
        )))
    }
}

/// Aggregate one year bucket.
pub fn yearly_statistic(
    bucket: &YearBucket,
    thresholds: &Thresholds,
) -> Result<YearlyStatistic, AnalysisError> {
    let year = bucket.year();
    let days = bucket.records();
    if days.is_empty() {
        return Err(AnalysisError::no_data(format!("no records for {}", year)));
    }

    let count = days.len() as f64;
    let total_rain = finite(days.iter().map(|d| d.precipitation).sum(), "total rain", year)?;
    let total_wind = finite(days.iter().map(|d| d.wind_speed).sum(), "total wind", year)?;
    let total_gusts = finite(days.iter().map(|d| d.wind_gusts).sum(), "total gusts", year)?;

    Ok(YearlyStatistic {
        year,
        flight_days: count_flight_days(days, thresholds),
        total_rain: round_to(total_rain, 1),
        // From the unrounded sum so rounding does not compound
        mean_daily_rain: round_to(total_rain / count, 2),
        mean_wind_speed: round_to(total_wind / count, 1),
        mean_wind_gusts: round_to(total_gusts / count, 1),
        total_days: days.len(),
    })
}

/// Figures that span every analysed year.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossYearSummary {
    pub average_flight_days: u64,
    pub standard_deviation: f64,
    pub yearly_data: Vec<usize>,
    pub total_days_analyzed: usize,
    pub years_analyzed: usize,
}

/// Summarize the yearly statistics, which must be in chronological order.
pub fn summarize(yearly: &[YearlyStatistic]) -> Result<CrossYearSummary, AnalysisError> {
    let yearly_data: Vec<usize> = yearly.iter().map(|y| y.flight_days).collect();
    let counts: Vec<f64> = yearly_data.iter().map(|&n| n as f64).collect();

    let (Some(average), Some(std_dev)) = (mean(&counts), population_std_dev(&counts)) else {
        return Err(AnalysisError::no_data("no valid weather data found for analysis"));
    };
    if !average.is_finite() || !std_dev.is_finite() {
        return Err(AnalysisError::computation(
            "flight-day summary is not finite",
        ));
    }

    Ok(CrossYearSummary {
        average_flight_days: round_to(average, 0) as u64,
        standard_deviation: round_to(std_dev, 2),
        years_analyzed: yearly_data.len(),
        total_days_analyzed: yearly.iter().map(|y| y.total_days).sum(),
        yearly_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DailyRecord;
    use chrono::NaiveDate;

    fn bucket(year: i32, days: &[(f64, f64, f64)]) -> YearBucket {
        let mut b = YearBucket::new(year);
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        for (i, &(rain, wind, gust)) in days.iter().enumerate() {
            b.push(DailyRecord {
                date: start + chrono::Days::new(i as u64),
                precipitation: rain,
                wind_speed: wind,
                wind_gusts: gust,
            })
            .unwrap();
        }
        b
    }

    fn stat(year: i32, flight_days: usize, total_days: usize) -> YearlyStatistic {
        YearlyStatistic {
            year,
            flight_days,
            total_rain: 0.0,
            mean_daily_rain: 0.0,
            mean_wind_speed: 0.0,
            mean_wind_gusts: 0.0,
            total_days,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to(2.675, 2), 2.68);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(119.5, 0), 120.0);
        assert_eq!(round_to(16.329931, 2), 16.33);
        assert_eq!(round_to(4.45, 1), 4.5);
    }

    #[test]
    fn test_population_std_dev() {
        let sd = population_std_dev(&[100.0, 120.0, 140.0]).unwrap();
        assert!((sd - 16.3299).abs() < 1e-3);
        assert_eq!(population_std_dev(&[7.0, 7.0, 7.0]), Some(0.0));
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn test_yearly_statistic_values() {
        let b = bucket(2021, &[(0.0, 1.0, 2.0), (5.0, 1.0, 2.0), (1.3, 4.0, 8.0)]);
        let s = yearly_statistic(&b, &Thresholds::default()).unwrap();
        assert_eq!(s.year, 2021);
        assert_eq!(s.flight_days, 2);
        assert_eq!(s.total_rain, 6.3);
        assert_eq!(s.mean_daily_rain, 2.1);
        assert_eq!(s.mean_wind_speed, 2.0);
        assert_eq!(s.mean_wind_gusts, 4.0);
        assert_eq!(s.total_days, 3);
    }

    #[test]
    fn test_mean_daily_rain_uses_unrounded_total() {
        // Total 0.14 rounds to 0.1; mean of the raw total is 0.07
        let b = bucket(2020, &[(0.07, 0.0, 0.0), (0.07, 0.0, 0.0)]);
        let s = yearly_statistic(&b, &Thresholds::default()).unwrap();
        assert_eq!(s.total_rain, 0.1);
        assert_eq!(s.mean_daily_rain, 0.07);
    }

    #[test]
    fn test_empty_bucket_is_no_data() {
        let b = YearBucket::new(2020);
        assert!(matches!(
            yearly_statistic(&b, &Thresholds::default()),
            Err(AnalysisError::NoData(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_computation_error() {
        let b = bucket(2020, &[(f64::INFINITY, 0.0, 0.0)]);
        assert!(matches!(
            yearly_statistic(&b, &Thresholds::default()),
            Err(AnalysisError::Computation(_))
        ));
    }

    #[test]
    fn test_summary_three_years() {
        let yearly = vec![stat(2020, 100, 366), stat(2021, 120, 365), stat(2022, 140, 365)];
        let s = summarize(&yearly).unwrap();
        assert_eq!(s.average_flight_days, 120);
        assert_eq!(s.standard_deviation, 16.33);
        assert_eq!(s.yearly_data, vec![100, 120, 140]);
        assert_eq!(s.total_days_analyzed, 1096);
        assert_eq!(s.years_analyzed, 3);
    }

    #[test]
    fn test_summary_identical_counts_have_zero_spread() {
        let yearly = vec![stat(2020, 90, 365), stat(2021, 90, 365)];
        assert_eq!(summarize(&yearly).unwrap().standard_deviation, 0.0);
    }

    #[test]
    fn test_summary_average_rounds_half_up() {
        let yearly = vec![stat(2020, 10, 365), stat(2021, 11, 365)];
        assert_eq!(summarize(&yearly).unwrap().average_flight_days, 11);
    }

    #[test]
    fn test_summary_of_nothing_is_no_data() {
        assert!(matches!(summarize(&[]), Err(AnalysisError::NoData(_))));
    }
}
