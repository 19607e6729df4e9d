// In-process presenter: renders tick updates and alerts via tracing.
// Real chart rendering lives outside the core; this adapter consumes the same
// interface a chart view would (per-metric series + per-tick alert list).

use crate::models::{Sample, Severity, TickUpdate};
use chrono::TimeZone;
use tokio::sync::broadcast;

/// Chart axis labels derived from real sample timestamps, local time.
pub fn time_labels(samples: &[Sample]) -> Vec<String> {
    samples.iter().map(|s| format_label(s.observed_at)).collect()
}

fn format_label(observed_at: u64) -> String {
    match chrono::Local.timestamp_millis_opt(observed_at as i64) {
        chrono::LocalResult::Single(t) => t.format("%H:%M:%S").to_string(),
        _ => "--:--:--".into(),
    }
}

/// Subscribes to tick updates and renders until the channel closes.
pub fn spawn(mut rx: broadcast::Receiver<TickUpdate>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut had_alerts = false;
        loop {
            match rx.recv().await {
                Ok(update) => render(&update, &mut had_alerts),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "presenter lagged behind tick updates");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("Presenter shutting down");
    })
}

fn render(update: &TickUpdate, had_alerts: &mut bool) {
    for (kind, samples) in &update.series {
        if let Some(latest) = samples.last() {
            tracing::info!(
                metric = %kind,
                points = samples.len(),
                "{} {:.1}{}",
                kind.label(),
                latest.value,
                kind.unit()
            );
        }
    }
    if !update.masked.is_empty() {
        tracing::debug!(?update.masked, "metrics without data this tick");
    }

    // An empty list clears the panel; render the transition once.
    if update.alerts.is_empty() {
        if *had_alerts {
            tracing::info!("alerts cleared");
        }
        *had_alerts = false;
        return;
    }
    for alert in &update.alerts {
        match alert.severity {
            Severity::Critical => tracing::error!(
                severity = %alert.severity,
                "{} high: {:.1} (threshold {})",
                alert.metric.label(),
                alert.value,
                alert.threshold
            ),
            Severity::Warning => tracing::warn!(
                severity = %alert.severity,
                "{} high: {:.1} (threshold {})",
                alert.metric.label(),
                alert.value,
                alert.threshold
            ),
        }
    }
    *had_alerts = true;
}
