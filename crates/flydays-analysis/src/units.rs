//! Normalization of raw archive readings.
//!
//! The archive reports wind in km/h and may return `null` for any variable on
//! any day. Every reading goes through the functions here exactly once, at
//! ingest.
//!
//! A missing reading becomes 0, the same as a genuine zero. Days with gaps
//! therefore count as calm and dry, which can overstate flight days at
//! stations with sparse data. The day is still kept so per-year day counts
//! match what upstream delivered.

use chrono::NaiveDate;

use crate::types::DailyRecord;

/// km/h in one m/s
pub const KMH_PER_MS: f64 = 3.6;

/// Convert an optional km/h reading to m/s.
pub fn wind_kmh_to_ms(raw: Option<f64>) -> f64 {
    match raw {
        Some(kmh) => kmh / KMH_PER_MS,
        None => 0.0,
    }
}

/// Precipitation is already in mm.
pub fn precipitation_mm(raw: Option<f64>) -> f64 {
    raw.unwrap_or(0.0)
}

/// Build a [`DailyRecord`] from one day of raw readings.
pub fn normalize_day(
    date: NaiveDate,
    precipitation: Option<f64>,
    wind_speed_kmh: Option<f64>,
    wind_gusts_kmh: Option<f64>,
) -> DailyRecord {
    DailyRecord {
        date,
        precipitation: precipitation_mm(precipitation),
        wind_speed: wind_kmh_to_ms(wind_speed_kmh),
        wind_gusts: wind_kmh_to_ms(wind_gusts_kmh),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_36_kmh_is_10_ms() {
        assert_eq!(wind_kmh_to_ms(Some(36.0)), 10.0);
    }

    #[test]
    fn test_missing_wind_is_zero() {
        assert_eq!(wind_kmh_to_ms(None), 0.0);
    }

    #[test]
    fn test_zero_and_missing_are_indistinguishable() {
        assert_eq!(wind_kmh_to_ms(Some(0.0)), wind_kmh_to_ms(None));
        assert_eq!(precipitation_mm(Some(0.0)), precipitation_mm(None));
    }

    #[test]
    fn test_precipitation_passes_through() {
        assert_eq!(precipitation_mm(Some(3.7)), 3.7);
    }

    #[test]
    fn test_normalize_day_with_null_wind() {
        let date = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
        let rec = normalize_day(date, Some(3.0), None, Some(18.0));
        assert_eq!(rec.date, date);
        assert_eq!(rec.precipitation, 3.0);
        assert_eq!(rec.wind_speed, 0.0);
        assert_eq!(rec.wind_gusts, 5.0);
    }
}
