// Domain models: metric kinds, samples, thresholds, alerts and per-tick updates

use serde::{Deserialize, Serialize};

/// The closed set of monitored series. `ALL` fixes the canonical iteration
/// order used for fetching, buffer updates and alert output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Ram,
    Disk,
    Ping,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Cpu,
        MetricKind::Ram,
        MetricKind::Disk,
        MetricKind::Ping,
    ];

    /// Wire name: the path segment of the metric endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Ram => "ram",
            MetricKind::Disk => "disk",
            MetricKind::Ping => "ping",
        }
    }

    /// Display name for alert and series rendering.
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Ram => "RAM",
            MetricKind::Disk => "Disk",
            MetricKind::Ping => "Ping",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Ping => "ms",
            _ => "%",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed value for one metric at one completed tick.
/// `observed_at` is epoch millis captured when the tick's fan-in joined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub value: f64,
    pub observed_at: u64,
}

/// The four latest values of one completed tick, carried as a single unit so
/// alert evaluation never sees partial data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSnapshot {
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
    pub ping: f64,
}

impl TickSnapshot {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Cpu => self.cpu,
            MetricKind::Ram => self.ram,
            MetricKind::Disk => self.disk,
            MetricKind::Ping => self.ping,
        }
    }

    pub fn set(&mut self, kind: MetricKind, value: f64) {
        match kind {
            MetricKind::Cpu => self.cpu = value,
            MetricKind::Ram => self.ram = value,
            MetricKind::Disk => self.disk = value,
            MetricKind::Ping => self.ping = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Critical => f.write_str("critical"),
        }
    }
}

/// Ephemeral alert, rebuilt from scratch each tick. `threshold` is the bound
/// that was crossed (critical when severity is critical, warning otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: Severity,
    pub metric: MetricKind,
    pub value: f64,
    pub threshold: f64,
}

/// Static warning/critical bounds for one metric. `warning < critical` is
/// enforced at config validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub warning: f64,
    pub critical: f64,
}

/// Per-metric threshold configuration. Defaults match the original dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub cpu: ThresholdPair,
    pub ram: ThresholdPair,
    pub disk: ThresholdPair,
    pub ping: ThresholdPair,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: ThresholdPair {
                warning: 70.0,
                critical: 80.0,
            },
            ram: ThresholdPair {
                warning: 75.0,
                critical: 85.0,
            },
            disk: ThresholdPair {
                warning: 80.0,
                critical: 90.0,
            },
            ping: ThresholdPair {
                warning: 100.0,
                critical: 150.0,
            },
        }
    }
}

impl Thresholds {
    pub fn get(&self, kind: MetricKind) -> ThresholdPair {
        match kind {
            MetricKind::Cpu => self.cpu,
            MetricKind::Ram => self.ram,
            MetricKind::Disk => self.disk,
            MetricKind::Ping => self.ping,
        }
    }
}

/// Display fallback while the hostname fetch has not succeeded.
pub const UNKNOWN_HOSTNAME: &str = "Waiting for agent connection...";

/// Session identity of the viewed client. `id` is fixed at startup; `hostname`
/// is filled in by a one-shot fetch and may stay unknown indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub id: String,
    pub hostname: Option<String>,
}

impl ClientIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hostname: None,
        }
    }

    pub fn display_hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(UNKNOWN_HOSTNAME)
    }
}

/// What the poller publishes after each completed cycle; the presenter-facing
/// interface. `masked` lists metrics whose fetch failed and was recorded as
/// zero this tick, so consumers can tell "no data" from a real zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TickUpdate {
    pub observed_at: u64,
    pub snapshot: TickSnapshot,
    pub masked: Vec<MetricKind>,
    pub series: Vec<(MetricKind, Vec<Sample>)>,
    pub alerts: Vec<Alert>,
}
