use crate::models::{MetricKind, Thresholds};
use crate::source;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the metrics service, e.g. "http://127.0.0.1:8000".
    pub base_url: String,
    /// Explicit client id; takes precedence over dashboard_path.
    pub client_id: Option<String>,
    /// Dashboard path to derive the client id from, e.g. "/view/abc123/".
    pub dashboard_path: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            client_id: None,
            dashboard_path: None,
            request_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Client id resolution: explicit value, else derived from the dashboard
    /// path, else the fixed default.
    pub fn resolved_client_id(&self) -> String {
        self.client_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.dashboard_path
                    .as_deref()
                    .and_then(source::client_id_from_path)
            })
            .unwrap_or_else(|| source::DEFAULT_CLIENT_ID.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
    /// Samples retained per metric (the sliding window).
    pub history_capacity: usize,
    /// Max tick updates kept in the broadcast channel for slow presenters.
    pub broadcast_capacity: usize,
    /// How often to log app stats (ticks completed, masked failures) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            history_capacity: 20,
            broadcast_capacity: 16,
            stats_log_interval_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load from CONFIG_FILE, or config.toml, or run entirely on defaults when
    /// no file exists and none was requested.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string("config.toml") {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.api.base_url.is_empty(),
            "api.base_url must be non-empty"
        );
        anyhow::ensure!(
            self.api.request_timeout_secs > 0,
            "api.request_timeout_secs must be > 0, got {}",
            self.api.request_timeout_secs
        );
        anyhow::ensure!(
            self.polling.interval_ms > 0,
            "polling.interval_ms must be > 0, got {}",
            self.polling.interval_ms
        );
        anyhow::ensure!(
            self.polling.history_capacity > 0,
            "polling.history_capacity must be > 0, got {}",
            self.polling.history_capacity
        );
        anyhow::ensure!(
            self.polling.broadcast_capacity > 0,
            "polling.broadcast_capacity must be > 0, got {}",
            self.polling.broadcast_capacity
        );
        anyhow::ensure!(
            self.polling.stats_log_interval_secs > 0,
            "polling.stats_log_interval_secs must be > 0, got {}",
            self.polling.stats_log_interval_secs
        );
        for kind in MetricKind::ALL {
            let pair = self.thresholds.get(kind);
            anyhow::ensure!(
                pair.warning < pair.critical,
                "thresholds.{}: warning ({}) must be below critical ({})",
                kind,
                pair.warning,
                pair.critical
            );
        }
        Ok(())
    }
}
