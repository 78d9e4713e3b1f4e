// Farm analysis screen model
use super::advice::{advice_for, WeeklyReport};
use super::metric::MetricReading;
use super::trend::TrendSeries;
use serde::Serialize;

pub const SCREEN_TITLE: &str = "Farm Data Analysis";
pub const TRENDS_HEADING: &str = "Weekly Trends";
pub const INSIGHTS_HEADING: &str = "Weekly Insights";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub name: String,
    pub value: String,
    pub advice: &'static str,
}

impl InsightCard {
    pub fn from_reading(reading: &MetricReading) -> Self {
        Self {
            name: reading.name.clone(),
            value: reading.display_value(),
            advice: advice_for(reading),
        }
    }
}

/// What the analysis screen shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FarmAnalysis {
    /// No readings published yet.
    Loading,
    Ready {
        trend: TrendSeries,
        cards: Vec<InsightCard>,
        weekly_report: WeeklyReport,
    },
}

impl FarmAnalysis {
    pub fn is_loading(&self) -> bool {
        matches!(self, FarmAnalysis::Loading)
    }
}
