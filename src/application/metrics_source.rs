// Producer trait for metric readings
use crate::domain::metric::MetricReading;
use crate::infrastructure::error::SourceError;
use async_trait::async_trait;

#[async_trait]
pub trait MetricsSource: Send {
    /// Fetch the latest readings.
    /// Returns `Ok(None)` when nothing changed since the previous fetch.
    async fn fetch(&mut self) -> Result<Option<Vec<MetricReading>>, SourceError>;

    /// Human-readable origin of the readings, used in logs
    fn description(&self) -> &str;
}
