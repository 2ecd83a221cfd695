//! Splitting a daily series into calendar-year buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::AnalysisError;
use crate::types::{DailyRecord, RawDailySeries, YearBucket};
use crate::units::normalize_day;

/// Buckets keyed by year; iteration is oldest year first.
pub type YearBuckets = BTreeMap<i32, YearBucket>;

/// Parse an archive date string.
///
/// Accepts `YYYY-MM-DD` and also a date-time such as `2024-03-01T00:00`, in
/// which case only the date part is used. No time-zone shifting is applied.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Normalize every day of a raw series, in order.
pub fn ingest(series: &RawDailySeries) -> Result<Vec<DailyRecord>, AnalysisError> {
    let days = series.time.len();
    let columns = [
        ("precipitation_sum", series.precipitation_sum.len()),
        ("wind_speed_10m_mean", series.wind_speed_10m_mean.len()),
        ("wind_gusts_10m_max", series.wind_gusts_10m_max.len()),
    ];
    for (name, len) in columns {
        if len != days {
            return Err(AnalysisError::invalid_input(format!(
                "{} has {} values but time has {}",
                name, len, days
            )));
        }
    }

    series
        .time
        .iter()
        .enumerate()
        .map(|(i, raw_date)| {
            let date = parse_day(raw_date).ok_or_else(|| {
                AnalysisError::invalid_input(format!(
                    "unparseable date {:?} at index {}",
                    raw_date, i
                ))
            })?;
            Ok(normalize_day(
                date,
                series.precipitation_sum[i],
                series.wind_speed_10m_mean[i],
                series.wind_gusts_10m_max[i],
            ))
        })
        .collect()
}

/// Group normalized records by calendar year.
///
/// A bucket exists only once a record has been added to it, so no bucket in
/// the result is empty.
pub fn group_by_year<I>(records: I) -> Result<YearBuckets, AnalysisError>
where
    I: IntoIterator<Item = DailyRecord>,
{
    let mut buckets = YearBuckets::new();
    for record in records {
        let year = record.date.year();
        buckets
            .entry(year)
            .or_insert_with(|| YearBucket::new(year))
            .push(record)?;
    }
    Ok(buckets)
}

/// Ingest and group in one pass over the series.
pub fn group_series(series: &RawDailySeries) -> Result<YearBuckets, AnalysisError> {
    let records = ingest(series)?;
    let buckets = group_by_year(records)?;
    tracing::debug!(
        days = series.len(),
        years = buckets.len(),
        "Grouped daily series by year"
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(days: &[(&str, Option<f64>, Option<f64>, Option<f64>)]) -> RawDailySeries {
        RawDailySeries {
            time: days.iter().map(|d| d.0.to_string()).collect(),
            precipitation_sum: days.iter().map(|d| d.1).collect(),
            wind_speed_10m_mean: days.iter().map(|d| d.2).collect(),
            wind_gusts_10m_max: days.iter().map(|d| d.3).collect(),
        }
    }

    #[test]
    fn test_parse_day_plain_and_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_day("2024-03-01"), expected);
        assert_eq!(parse_day("2024-03-01T00:00"), expected);
        assert_eq!(parse_day("not a date"), None);
        assert_eq!(parse_day("2024-13-01"), None);
    }

    #[test]
    fn test_year_boundary_is_local_date() {
        // New Year's Eve must not drift into the next year
        let s = series(&[
            ("2022-12-31", Some(0.0), Some(0.0), Some(0.0)),
            ("2023-01-01", Some(0.0), Some(0.0), Some(0.0)),
        ]);
        let buckets = group_series(&s).unwrap();
        assert_eq!(buckets[&2022].len(), 1);
        assert_eq!(buckets[&2023].len(), 1);
    }

    #[test]
    fn test_buckets_iterate_in_year_order() {
        let s = series(&[
            ("2021-06-01", None, None, None),
            ("2019-06-01", None, None, None),
            ("2020-06-01", None, None, None),
        ]);
        let years: Vec<i32> = group_series(&s).unwrap().keys().copied().collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_every_record_lands_in_its_year() {
        let s = series(&[
            ("2020-01-01", Some(1.0), Some(3.6), Some(7.2)),
            ("2020-12-31", Some(2.0), Some(3.6), Some(7.2)),
            ("2021-01-01", Some(3.0), Some(3.6), Some(7.2)),
        ]);
        let buckets = group_series(&s).unwrap();
        for (year, bucket) in &buckets {
            assert_eq!(bucket.year(), *year);
            assert!(bucket.records().iter().all(|r| r.date.year() == *year));
        }
        assert_eq!(buckets.values().map(YearBucket::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_missing_values_keep_the_day() {
        let s = series(&[("2020-05-05", Some(3.0), None, None)]);
        let buckets = group_series(&s).unwrap();
        let rec = buckets[&2020].records()[0];
        assert_eq!(rec.precipitation, 3.0);
        assert_eq!(rec.wind_speed, 0.0);
        assert_eq!(rec.wind_gusts, 0.0);
        assert_eq!(buckets[&2020].len(), 1);
    }

    #[test]
    fn test_empty_series_yields_no_buckets() {
        let buckets = group_series(&RawDailySeries::default()).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let mut s = series(&[("2020-01-01", Some(0.0), Some(0.0), Some(0.0))]);
        s.wind_gusts_10m_max.clear();
        let err = group_series(&s).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(ref m) if m.contains("wind_gusts_10m_max")));
    }

    #[test]
    fn test_bad_date_rejected() {
        let s = series(&[("01/02/2020", Some(0.0), Some(0.0), Some(0.0))]);
        assert!(matches!(
            group_series(&s),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
