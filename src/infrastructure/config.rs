use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default)]
    pub output: OutputFormat,
    /// Exit after the first screen that has readings
    #[serde(default)]
    pub once: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_readings_path")]
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_readings_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    #[default]
    Preview,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_refresh_secs() -> u64 {
    5
}

fn default_readings_path() -> PathBuf {
    PathBuf::from("data/weekly_metrics.toml")
}

/// Load `config/farm_insights.*` (optional) overlaid with `FARM_INSIGHTS_*` variables,
/// e.g. `FARM_INSIGHTS_REFRESH_SECS=10` or `FARM_INSIGHTS_SOURCE__KIND=file`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_app_config(
        config::File::with_name("config/farm_insights").required(false),
        env_overrides(),
    )
}

fn env_overrides() -> config::Environment {
    config::Environment::with_prefix("FARM_INSIGHTS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build_app_config<S>(file: S, env: config::Environment) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    let mut app_config: AppConfig = settings.try_deserialize()?;
    app_config.refresh_secs = app_config.refresh_secs.max(1);
    Ok(app_config)
}
