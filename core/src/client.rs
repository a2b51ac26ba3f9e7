//! HTTP client for the remote new-case monitor service.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{MonitorError, Result},
    models::{ErrorBody, FoundCase, Items, Monitor, NewMonitorRequest},
};

pub const DEFAULT_BASE_URL: &str =
    "https://api.escavador.com/api/v2/monitoramentos/novos-processos";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations offered by the remote monitor service.
///
/// Every call is a single request: no caching, no retries, no coalescing of
/// concurrent calls.
pub trait MonitorApi {
    fn list_monitors(&self) -> impl Future<Output = Result<Vec<Monitor>>> + Send;

    fn create_monitor(
        &self,
        request: &NewMonitorRequest,
    ) -> impl Future<Output = Result<Monitor>> + Send;

    fn delete_monitor(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn fetch_results(&self, id: i64) -> impl Future<Output = Result<Vec<FoundCase>>> + Send;
}

/// Connection settings, fixed for the lifetime of a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpMonitorClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMonitorClient {
    /// Build a client that sends the bearer token and JSON headers on every call.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let token = config.token.trim();
        if token.is_empty() {
            return Err(MonitorError::Config("API token is empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            MonitorError::Config("API token contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn monitor_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Send a request and return the raw body of a 2xx response
    async fn send(&self, request: reqwest::RequestBuilder, fallback: &str) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "request to monitor service failed");
            MonitorError::Network(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(MonitorError::Network)?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
            warn!(status = status.as_u16(), message = %message, "monitor service returned an error");
            return Err(MonitorError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.to_vec())
    }

    async fn get_items<T: DeserializeOwned>(&self, url: &str, fallback: &str) -> Result<Vec<T>> {
        let body = self.send(self.client.get(url), fallback).await?;
        let envelope: Items<T> = serde_json::from_slice(&body)?;
        Ok(envelope.items)
    }
}

impl MonitorApi for HttpMonitorClient {
    async fn list_monitors(&self) -> Result<Vec<Monitor>> {
        debug!(url = %self.base_url, "GET monitors");
        let monitors: Vec<Monitor> = self
            .get_items(&self.base_url, "Failed to load monitors")
            .await?;
        debug!(count = monitors.len(), "loaded monitors");
        Ok(monitors)
    }

    async fn create_monitor(&self, request: &NewMonitorRequest) -> Result<Monitor> {
        debug!(url = %self.base_url, termo = %request.termo, "POST monitor");
        let body = self
            .send(
                self.client.post(&self.base_url).json(request),
                "Failed to create monitor",
            )
            .await?;
        let monitor: Monitor = serde_json::from_slice(&body)?;
        debug!(id = monitor.id, "created monitor");
        Ok(monitor)
    }

    async fn delete_monitor(&self, id: i64) -> Result<()> {
        let url = self.monitor_url(id);
        debug!(url = %url, "DELETE monitor");
        // a success body, if any, carries nothing we need
        self.send(self.client.delete(&url), "Failed to delete monitor")
            .await?;
        Ok(())
    }

    async fn fetch_results(&self, id: i64) -> Result<Vec<FoundCase>> {
        let url = format!("{}/resultados", self.monitor_url(id));
        debug!(url = %url, "GET monitor results");
        let cases: Vec<FoundCase> = self.get_items(&url, "Failed to load results").await?;
        debug!(id, count = cases.len(), "loaded monitor results");
        Ok(cases)
    }
}

/// The `error` field of an error body, when there is a non-blank one
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}
