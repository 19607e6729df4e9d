use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use syswatch_view::*;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let client_id = app_config.api.resolved_client_id();
    tracing::info!(
        version = version::VERSION,
        client_id = %client_id,
        base_url = %app_config.api.base_url,
        interval_ms = app_config.polling.interval_ms,
        "starting viewer"
    );

    let source = Arc::new(source::HttpMetricSource::connect(
        &app_config.api.base_url,
        &client_id,
        Duration::from_secs(app_config.api.request_timeout_secs),
    )?);

    let (tx, rx) = broadcast::channel::<models::TickUpdate>(app_config.polling.broadcast_capacity);
    let presenter_handle = presenter::spawn(rx);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let poller_handle = poller::spawn(
        poller::PollerDeps {
            source,
            identity: models::ClientIdentity::new(client_id),
            tx,
            shutdown_rx,
        },
        poller::PollerConfig {
            interval_ms: app_config.polling.interval_ms,
            history_capacity: app_config.polling.history_capacity,
            thresholds: app_config.thresholds,
            stats_log_interval_secs: app_config.polling.stats_log_interval_secs,
        },
    );

    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                tokio::signal::ctrl_c().await?;
                tracing::info!("Received shutdown signal");
                let _ = shutdown_tx.send(());
                let _ = poller_handle.await;
                let _ = presenter_handle.await;
                return Ok(());
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let _ = poller_handle.await;
    let _ = presenter_handle.await;

    Ok(())
}
