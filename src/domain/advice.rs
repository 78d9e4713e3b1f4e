// Advice rules - static recommendations keyed on metric identity
//
// Advice depends only on which metric a reading is, never on its value.
use super::metric::{MetricKind, MetricReading};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_ADVICE: &str = "No advice available for this metric.";

/// Advice shown on a metric's insight card.
pub fn advice_for(reading: &MetricReading) -> &'static str {
    match reading.kind() {
        Some(kind) => kind_advice(kind),
        None => DEFAULT_ADVICE,
    }
}

fn kind_advice(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::FertilizerUse => "Recommended fertilizer usage is within optimal range.",
        MetricKind::WaterUsage => "Water usage is slightly high. Consider reducing irrigation.",
        MetricKind::SoilHealth => "Soil health is stable, but periodic testing is advised.",
    }
}

/// Combined weekly summary over the three known metric kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    pub fertilizer: &'static str,
    pub water: &'static str,
    pub soil: &'static str,
}

pub fn weekly_insights(readings: &[MetricReading]) -> WeeklyReport {
    let status = |kind: MetricKind| {
        let present = readings.iter().any(|r| r.kind() == Some(kind));
        match (kind, present) {
            (MetricKind::FertilizerUse, true) => "Weekly fertilizer usage is optimal",
            (MetricKind::FertilizerUse, false) => "No fertilizer data",
            (MetricKind::WaterUsage, true) => "Water usage is slightly high. Reduce watering",
            (MetricKind::WaterUsage, false) => "No water data",
            (MetricKind::SoilHealth, true) => "Soil health is good",
            (MetricKind::SoilHealth, false) => "Soil health data missing",
        }
    };

    WeeklyReport {
        fertilizer: status(MetricKind::FertilizerUse),
        water: status(MetricKind::WaterUsage),
        soil: status(MetricKind::SoilHealth),
    }
}

impl fmt::Display for WeeklyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fertilizer Advice: {}\nWater Usage: {}\nSoil Health: {}",
            self.fertilizer, self.water, self.soil
        )
    }
}
