// Metric reading domain model
use serde::{Deserialize, Serialize};

/// One named, valued, unit-labelled sensor observation.
///
/// The producer guarantees `value` is finite; nothing here re-checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

impl MetricReading {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }

    /// Value and unit as shown on an insight card, e.g. "45 %".
    pub fn display_value(&self) -> String {
        if self.unit.is_empty() {
            self.value.to_string()
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }

    pub fn kind(&self) -> Option<MetricKind> {
        MetricKind::from_name(&self.name)
    }
}

/// The metric kinds the advice rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    FertilizerUse,
    WaterUsage,
    SoilHealth,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::FertilizerUse,
        MetricKind::WaterUsage,
        MetricKind::SoilHealth,
    ];

    /// Exact, case-sensitive match on the sensor label.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fertilizer Use" => Some(MetricKind::FertilizerUse),
            "Water Usage" => Some(MetricKind::WaterUsage),
            "Soil Health" => Some(MetricKind::SoilHealth),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::FertilizerUse => "Fertilizer Use",
            MetricKind::WaterUsage => "Water Usage",
            MetricKind::SoilHealth => "Soil Health",
        }
    }
}
