// Preview producer - Fixed sample week used when no readings file is configured
use crate::application::metrics_source::MetricsSource;
use crate::domain::metric::MetricReading;
use crate::infrastructure::error::SourceError;
use async_trait::async_trait;

pub fn preview_readings() -> Vec<MetricReading> {
    vec![
        MetricReading::new("Moisture", 45.0, "%"),
        MetricReading::new("Temperature", 23.0, "°C"),
        MetricReading::new("PH Level", 6.5, ""),
    ]
}

/// Yields the preview readings on the first fetch and nothing afterwards.
#[derive(Debug, Default)]
pub struct PreviewMetricsSource {
    delivered: bool,
}

impl PreviewMetricsSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricsSource for PreviewMetricsSource {
    async fn fetch(&mut self) -> Result<Option<Vec<MetricReading>>, SourceError> {
        if self.delivered {
            return Ok(None);
        }
        self.delivered = true;
        Ok(Some(preview_readings()))
    }

    fn description(&self) -> &str {
        "preview"
    }
}
