// Shared test helpers

use syswatch_view::models::MetricKind;
use syswatch_view::source::{MetricSource, SourceError};

/// Scripted metric source: one fixed value per metric, optional per-metric
/// failures, optional hostname answer.
pub struct FakeSource {
    values: [f64; 4],
    failing: Vec<MetricKind>,
    hostname: Option<String>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn new(cpu: f64, ram: f64, disk: f64, ping: f64) -> Self {
        Self {
            values: [cpu, ram, disk, ping],
            failing: Vec::new(),
            hostname: Some("test-host".into()),
        }
    }

    /// Make fetches for `kind` fail.
    pub fn failing(mut self, kind: MetricKind) -> Self {
        self.failing.push(kind);
        self
    }

    /// Make the hostname fetch fail.
    pub fn without_hostname(mut self) -> Self {
        self.hostname = None;
        self
    }
}

impl MetricSource for FakeSource {
    async fn fetch_metric(&self, kind: MetricKind) -> Result<f64, SourceError> {
        if self.failing.contains(&kind) {
            Err(SourceError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        } else {
            Ok(self.values[kind as usize])
        }
    }

    async fn fetch_hostname(&self) -> Result<String, SourceError> {
        self.hostname
            .clone()
            .ok_or(SourceError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}
