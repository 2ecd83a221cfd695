//! The date range requested from the archive.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::types::WeatherError;

/// Inclusive range of local calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoricalWindow {
    /// `years` whole years ending yesterday, with "yesterday" taken in `tz`.
    ///
    /// The archive lags by a day or so, which is why today is never
    /// requested. A start date of Feb 29 that does not exist `years` back
    /// becomes Feb 28.
    pub fn trailing(now: DateTime<Utc>, tz: Tz, years: u32) -> Result<Self, WeatherError> {
        if years == 0 {
            return Err(WeatherError::InvalidInput(
                "window must cover at least one year".to_string(),
            ));
        }

        let today = now.with_timezone(&tz).date_naive();
        let end = today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| WeatherError::InvalidInput(format!("no day before {}", today)))?;
        let start = today
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .ok_or_else(|| {
                WeatherError::InvalidInput(format!("{} years before {} is out of range", years, today))
            })?;

        Ok(Self { start, end })
    }

    /// Number of days in the window, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Parse an IANA zone name such as `Europe/Oslo`.
pub fn parse_timezone(name: &str) -> Result<Tz, WeatherError> {
    name.parse::<Tz>()
        .map_err(|e| WeatherError::Config(format!("unknown timezone {:?}: {}", name, e)))
}
