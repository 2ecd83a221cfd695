//! JSON shape of a finished analysis, as consumers of the old web API
//! expect it: `{ location, thresholds, analysis: { ..., dataSource } }`.

use flydays_analysis::{Thresholds, YearlyStatistic};
use serde::Serialize;

use crate::service::Analysis;
use crate::types::Location;
use crate::window::HistoricalWindow;

pub const DATA_SOURCE: &str = "Open-Meteo Historical Weather API";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub location: Location,
    pub thresholds: Thresholds,
    pub analysis: ReportBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub average_flight_days: u64,
    pub standard_deviation: f64,
    pub yearly_data: Vec<usize>,
    pub yearly_statistics: Vec<YearlyStatistic>,
    pub total_days_analyzed: usize,
    pub years_analyzed: usize,
    pub period: HistoricalWindow,
    pub data_source: &'static str,
}

impl AnalysisReport {
    pub fn new(analysis: &Analysis) -> Self {
        let result = &analysis.result;
        Self {
            location: analysis.location.clone(),
            thresholds: result.thresholds,
            analysis: ReportBody {
                average_flight_days: result.average_flight_days,
                standard_deviation: result.standard_deviation,
                yearly_data: result.yearly_data.clone(),
                yearly_statistics: result.yearly_statistics.clone(),
                total_days_analyzed: result.total_days_analyzed,
                years_analyzed: result.years_analyzed,
                period: analysis.window,
                data_source: DATA_SOURCE,
            },
        }
    }
}
