// File-backed reading producer
use crate::application::metrics_source::MetricsSource;
use crate::domain::metric::MetricReading;
use crate::infrastructure::error::SourceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Deserialize)]
struct ReadingsFile {
    #[serde(default)]
    readings: Vec<MetricReading>,
}

/// Reads `[[readings]]` tables from a TOML file.
///
/// The file is only re-read when its modification time changes.
#[derive(Debug)]
pub struct FileMetricsSource {
    path: PathBuf,
    description: String,
    last_modified: Option<SystemTime>,
}

impl FileMetricsSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_modified: None,
        }
    }

    fn io_error(&self, source: std::io::Error) -> SourceError {
        SourceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<MetricReading>, SourceError> {
        let file: ReadingsFile = toml::from_str(content).map_err(|e| SourceError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        for (index, reading) in file.readings.iter().enumerate() {
            validate(index, reading)?;
        }

        Ok(file.readings)
    }
}

fn validate(index: usize, reading: &MetricReading) -> Result<(), SourceError> {
    let reason = if reading.name.trim().is_empty() {
        "name is empty"
    } else if !reading.value.is_finite() {
        "value is not a finite number"
    } else {
        return Ok(());
    };

    Err(SourceError::InvalidReading {
        index,
        name: reading.name.clone(),
        reason,
    })
}

#[async_trait]
impl MetricsSource for FileMetricsSource {
    async fn fetch(&mut self) -> Result<Option<Vec<MetricReading>>, SourceError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let modified = metadata.modified().ok();

        if modified.is_some() && modified == self.last_modified {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let readings = self.parse(&content)?;

        tracing::debug!(
            "Read {} readings from {}",
            readings.len(),
            self.path.display()
        );

        // Only remember the timestamp once the file parsed, so a broken file is retried.
        self.last_modified = modified;
        Ok(Some(readings))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
