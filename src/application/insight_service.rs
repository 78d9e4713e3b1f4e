// Insight service - Derives the analysis screen from a snapshot
use crate::domain::advice::weekly_insights;
use crate::domain::analysis::{FarmAnalysis, InsightCard};
use crate::domain::metric::MetricReading;
use crate::domain::trend::TrendSeries;

/// Anything that shows a [`FarmAnalysis`] to the user.
pub trait InsightPresenter {
    fn present(&mut self, analysis: &FarmAnalysis) -> anyhow::Result<()>;
}

pub fn analyse(readings: &[MetricReading]) -> FarmAnalysis {
    if readings.is_empty() {
        return FarmAnalysis::Loading;
    }

    FarmAnalysis::Ready {
        trend: TrendSeries::weekly(readings),
        cards: readings.iter().map(InsightCard::from_reading).collect(),
        weekly_report: weekly_insights(readings),
    }
}
