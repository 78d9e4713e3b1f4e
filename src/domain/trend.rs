// Trend chart domain models
use super::metric::MetricReading;
use serde::Serialize;

pub const WEEKLY_SERIES_LABEL: &str = "Weekly Metrics";

/// A chart point. `index` is the reading's position in the snapshot, not a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub index: usize,
    pub value: f64,
}

impl TrendPoint {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

/// Map readings to chart points, one per reading, in order.
pub fn project(readings: &[MetricReading]) -> Vec<TrendPoint> {
    readings
        .iter()
        .enumerate()
        .map(|(index, reading)| TrendPoint::new(index, reading.value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub label: String,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(label: String, points: Vec<TrendPoint>) -> Self {
        Self { label, points }
    }

    pub fn weekly(readings: &[MetricReading]) -> Self {
        Self::new(WEEKLY_SERIES_LABEL.to_string(), project(readings))
    }

    /// Smallest and largest point value, for sizing the y axis.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }
}
