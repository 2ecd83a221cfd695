//! Flight-day test.

use crate::types::{DailyRecord, Thresholds};

impl Thresholds {
    /// True when the day is within every bound. Equality counts as flyable.
    pub fn permits(&self, day: &DailyRecord) -> bool {
        day.precipitation <= self.max_rain
            && day.wind_speed <= self.max_wind
            && day.wind_gusts <= self.max_wind_gusts
    }
}

/// Count the days in `days` that satisfy `thresholds`.
pub fn count_flight_days(days: &[DailyRecord], thresholds: &Thresholds) -> usize {
    days.iter().filter(|day| thresholds.permits(day)).count()
}
