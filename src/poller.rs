// The sampling-and-alerting loop (the viewer's only timing authority).
// Each tick fans out one fetch per metric, joins, masks individual failures to
// zero, updates the windows in canonical order and evaluates alerts once on
// the completed snapshot.

use crate::alerts;
use crate::history::MetricHistory;
use crate::models::{ClientIdentity, MetricKind, Sample, Thresholds, TickSnapshot, TickUpdate};
use crate::source::MetricSource;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval, interval_at};

/// Rate limit for "no receivers" logging (avoid a line every tick when no presenter is attached)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Source, identity, output channel and shutdown for the poller.
pub struct PollerDeps<S> {
    pub source: Arc<S>,
    pub identity: ClientIdentity,
    pub tx: broadcast::Sender<TickUpdate>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Poller timing and window config.
pub struct PollerConfig {
    pub interval_ms: u64,
    pub history_capacity: usize,
    pub thresholds: Thresholds,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub struct Poller<S> {
    source: Arc<S>,
    identity: ClientIdentity,
    history: MetricHistory,
    thresholds: Thresholds,
    tx: broadcast::Sender<TickUpdate>,
    ticks_total: u64,
    masked_failures_total: u64,
    last_no_receivers_warn: Option<Instant>,
}

impl<S: MetricSource> Poller<S> {
    pub fn new(
        source: Arc<S>,
        identity: ClientIdentity,
        thresholds: Thresholds,
        history_capacity: usize,
        tx: broadcast::Sender<TickUpdate>,
    ) -> Self {
        Self {
            source,
            identity,
            history: MetricHistory::new(history_capacity),
            thresholds,
            tx,
            ticks_total: 0,
            masked_failures_total: 0,
            last_no_receivers_warn: None,
        }
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub fn history(&self) -> &MetricHistory {
        &self.history
    }

    /// One-shot hostname refresh, independent of the metric cycle. Failure is
    /// non-fatal: the identity stays unknown and there is no retry.
    pub async fn refresh_hostname(&mut self) {
        match self.source.fetch_hostname().await {
            Ok(hostname) => {
                tracing::info!(hostname = %hostname, "hostname resolved");
                self.identity.hostname = Some(hostname);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "fetch_hostname",
                    "hostname fetch failed; display stays \"{}\"",
                    self.identity.display_hostname()
                );
            }
        }
    }

    /// One complete poll cycle. Fetches run concurrently; the cycle suspends
    /// until all four settle. A failed fetch is masked to zero for this tick
    /// so the remaining series keep updating.
    pub async fn tick(&mut self) -> TickUpdate {
        let fetches = MetricKind::ALL.map(|kind| {
            let source = Arc::clone(&self.source);
            async move { (kind, source.fetch_metric(kind).await) }
        });
        let results = futures_util::future::join_all(fetches).await;

        let observed_at = now_millis();
        let mut snapshot = TickSnapshot::default();
        let mut masked = Vec::new();
        // join_all keeps input order, so windows update in canonical order.
        for (kind, result) in results {
            let value = match result {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        metric = %kind,
                        error = %e,
                        operation = "fetch_metric",
                        "metric fetch failed; recording zero for this tick"
                    );
                    self.masked_failures_total += 1;
                    masked.push(kind);
                    0.0
                }
            };
            snapshot.set(kind, value);
            self.history.append(kind, Sample { value, observed_at });
        }

        let alerts = alerts::evaluate(&snapshot, &self.thresholds);
        self.ticks_total += 1;

        TickUpdate {
            observed_at,
            snapshot,
            masked,
            series: self.history.series(),
            alerts,
        }
    }

    fn publish(&mut self, update: TickUpdate) {
        if self.tx.send(update).is_err() {
            let should_warn = self
                .last_no_receivers_warn
                .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
            if should_warn {
                tracing::debug!(
                    operation = "publish_tick",
                    "No attached presenters; broadcast channel has no receivers"
                );
                self.last_no_receivers_warn = Some(Instant::now());
            }
        }
    }

    /// Resolve the hostname once, run an immediate first cycle, then poll on a
    /// fixed period until shutdown. Cycles run inline in the loop body, so a
    /// new cycle only starts after the previous join completes; missed timer
    /// ticks are skipped rather than bursted.
    pub async fn run(
        mut self,
        mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
        interval_ms: u64,
        stats_log_interval_secs: u64,
    ) {
        self.refresh_hostname().await;

        let update = self.tick().await;
        self.publish(update);
        tracing::info!(client_id = %self.identity.id, "initial sample cycle complete");

        let period = Duration::from_millis(interval_ms);
        let mut tick_timer = interval_at(Instant::now() + period, period);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    let update = self.tick().await;
                    self.publish(update);
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Poller shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        ticks_total = self.ticks_total,
                        masked_failures_total = self.masked_failures_total,
                        "app stats"
                    );
                }
            }
        }
    }
}

pub fn spawn<S: MetricSource + 'static>(
    deps: PollerDeps<S>,
    config: PollerConfig,
) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        source,
        identity,
        tx,
        shutdown_rx,
    } = deps;
    let PollerConfig {
        interval_ms,
        history_capacity,
        thresholds,
        stats_log_interval_secs,
    } = config;

    let poller = Poller::new(source, identity, thresholds, history_capacity, tx);
    tokio::spawn(poller.run(shutdown_rx, interval_ms, stats_log_interval_secs))
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                operation = "get_timestamp",
                "system time error"
            );
            0
        })
}
