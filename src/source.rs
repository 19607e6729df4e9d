// Metric source seam: HTTP fetch against the per-client metrics API

use crate::models::MetricKind;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Identifier substituted when none can be derived.
pub const DEFAULT_CLIENT_ID: &str = "demo-client";

/// Fixed API path segment between the origin and the client id.
const API_PATH: &str = "api/metrics";

/// Marker preceding the client id in a dashboard path like `/view/<id>/`.
const VIEW_MARKER: &str = "/view/";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
}

/// The seam to the external metrics service. Failure stays visible at this
/// boundary; the poller decides the masking policy per tick.
pub trait MetricSource: Send + Sync {
    fn fetch_metric(
        &self,
        kind: MetricKind,
    ) -> impl Future<Output = Result<f64, SourceError>> + Send;

    fn fetch_hostname(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

#[derive(Debug, Deserialize)]
struct MetricPayload {
    // Absent value decodes as 0, matching the service's `{"value": ...}` contract
    // where a missing field means "nothing measured yet".
    #[serde(default)]
    value: f64,
}

#[derive(Debug, Deserialize)]
struct HostnamePayload {
    hostname: String,
}

/// Production source: `GET {origin}/api/metrics/{client_id}/{metric}/`.
pub struct HttpMetricSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricSource {
    pub fn connect(
        origin: &str,
        client_id: &str,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: metrics_base_url(origin, client_id),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: String) -> Result<T, SourceError> {
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        Ok(response.json::<T>().await?)
    }
}

impl MetricSource for HttpMetricSource {
    async fn fetch_metric(&self, kind: MetricKind) -> Result<f64, SourceError> {
        let url = format!("{}/{}/", self.base_url, kind.as_str());
        let payload: MetricPayload = self.get_json(url).await?;
        Ok(payload.value)
    }

    async fn fetch_hostname(&self) -> Result<String, SourceError> {
        let url = format!("{}/hostname/", self.base_url);
        let payload: HostnamePayload = self.get_json(url).await?;
        Ok(payload.hostname)
    }
}

/// `{origin}/api/metrics/{client_id}`, tolerant of a trailing slash on origin.
pub fn metrics_base_url(origin: &str, client_id: &str) -> String {
    format!("{}/{}/{}", origin.trim_end_matches('/'), API_PATH, client_id)
}

/// Extract the client id from a dashboard path: the segment following the
/// `/view/` marker, trailing slash stripped. `None` when absent or empty.
pub fn client_id_from_path(path: &str) -> Option<String> {
    let rest = path.split(VIEW_MARKER).nth(1)?;
    let id = rest.split('/').next().unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
