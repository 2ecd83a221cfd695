use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Default maximum daily precipitation in mm
pub const DEFAULT_MAX_RAIN_MM: f64 = 2.0;
/// Default maximum mean wind speed in m/s
pub const DEFAULT_MAX_WIND_MS: f64 = 10.0;
/// Default maximum wind gust speed in m/s
pub const DEFAULT_MAX_WIND_GUSTS_MS: f64 = 15.0;

/// Upper bounds a day must stay within to count as a flight day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Maximum precipitation in mm/day
    pub max_rain: f64,
    /// Maximum mean wind speed at 10 m in m/s
    pub max_wind: f64,
    /// Maximum wind gust speed at 10 m in m/s
    pub max_wind_gusts: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_rain: DEFAULT_MAX_RAIN_MM,
            max_wind: DEFAULT_MAX_WIND_MS,
            max_wind_gusts: DEFAULT_MAX_WIND_GUSTS_MS,
        }
    }
}

impl Thresholds {
    pub fn new(max_rain: f64, max_wind: f64, max_wind_gusts: f64) -> Self {
        Self {
            max_rain,
            max_wind,
            max_wind_gusts,
        }
    }

    /// Reject negative or non-finite bounds.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fields = [
            ("maxRain", self.max_rain),
            ("maxWind", self.max_wind),
            ("maxWindGusts", self.max_wind_gusts),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(AnalysisError::invalid_input(format!(
                    "{} must be a finite number",
                    name
                )));
            }
            if value < 0.0 {
                return Err(AnalysisError::invalid_input(format!(
                    "{} must not be negative (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Point the analysis was run for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The `daily` block of an archive response, as delivered upstream.
///
/// The four sequences are parallel and ordered by date. Wind values are in
/// km/h; any entry may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDailySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m_max: Vec<Option<f64>>,
}

impl RawDailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True only when every column is empty; a series with dates missing
    /// but readings present is malformed, not empty.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.precipitation_sum.is_empty()
            && self.wind_speed_10m_mean.is_empty()
            && self.wind_gusts_10m_max.is_empty()
    }
}

/// One normalized day of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Mean wind speed in m/s
    pub wind_speed: f64,
    /// Maximum wind gust in m/s
    pub wind_gusts: f64,
}

/// All records that fall in one calendar year, in delivery order
#[derive(Debug, Clone, PartialEq)]
pub struct YearBucket {
    year: i32,
    records: Vec<DailyRecord>,
}

impl YearBucket {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            records: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record; records from another year are refused.
    pub fn push(&mut self, record: DailyRecord) -> Result<(), AnalysisError> {
        use chrono::Datelike;

        if record.date.year() != self.year {
            return Err(AnalysisError::invalid_input(format!(
                "record dated {} does not belong to year {}",
                record.date, self.year
            )));
        }
        self.records.push(record);
        Ok(())
    }
}

/// Per-year aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStatistic {
    pub year: i32,
    pub flight_days: usize,
    /// Sum of daily precipitation, 1 decimal
    pub total_rain: f64,
    /// Mean daily precipitation, 2 decimals
    pub mean_daily_rain: f64,
    /// Mean of daily mean wind speed, 1 decimal
    pub mean_wind_speed: f64,
    /// Mean of daily max gusts, 1 decimal
    pub mean_wind_gusts: f64,
    pub total_days: usize,
}

/// Summary of a complete multi-year analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub location: Coordinates,
    pub thresholds: Thresholds,
    pub average_flight_days: u64,
    pub standard_deviation: f64,
    /// Flight-day counts, one per year, oldest first
    pub yearly_data: Vec<usize>,
    pub yearly_statistics: Vec<YearlyStatistic>,
    pub total_days_analyzed: usize,
    pub years_analyzed: usize,
}
