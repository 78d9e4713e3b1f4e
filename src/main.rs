// Main entry point - Wires the producer, the metrics stream and the presenter
use std::time::Duration;

use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use farm_insights::application::insight_service::{analyse, InsightPresenter};
use farm_insights::application::metrics_source::MetricsSource;
use farm_insights::application::metrics_stream::MetricsStream;
use farm_insights::infrastructure::config::{load_app_config, SourceKind};
use farm_insights::infrastructure::file_source::FileMetricsSource;
use farm_insights::infrastructure::preview_source::PreviewMetricsSource;
use farm_insights::presentation::terminal::TerminalPresenter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the rendered screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("farm_insights=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app_config = load_app_config()?;

    let mut source: Box<dyn MetricsSource> = match app_config.source.kind {
        SourceKind::File => Box::new(FileMetricsSource::new(&app_config.source.path)),
        SourceKind::Preview => Box::new(PreviewMetricsSource::new()),
    };
    let mut presenter = TerminalPresenter::new(std::io::stdout(), app_config.output);

    let stream = MetricsStream::new();
    let updates = stream.updates();
    futures::pin_mut!(updates);

    let mut ticker = tokio::time::interval(Duration::from_secs(app_config.refresh_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        source = source.description(),
        refresh_secs = app_config.refresh_secs,
        "Starting farm-insights"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => match source.fetch().await {
                Ok(Some(readings)) => {
                    tracing::info!("Loaded {} readings from {}", readings.len(), source.description());
                    stream.publish(readings);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to fetch readings from {}: {}", source.description(), e);
                }
            },
            Some(snapshot) = updates.next() => {
                let analysis = analyse(&snapshot);
                presenter.present(&analysis)?;
                if app_config.once && !analysis.is_loading() {
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
