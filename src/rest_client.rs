use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use serde_json::Value;
use tracing::log;

use crate::config_handler::Config;
use crate::error::{ApiError, UpstreamError};
use crate::models::Endpoint;
use crate::snapshot_store::SnapshotWriter;

/// Single attempt client for the provider. No retries, one deadline per call.
#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl RestClient {
    pub fn new(config: Arc<Config>) -> RestClient {
        RestClient { client: reqwest::Client::new(), config }
    }

    pub async fn get_call(&self, endpoint: &Endpoint) -> Result<Value, UpstreamError> {
        let before = Instant::now();
        let url = endpoint.get_url(&self.config);
        let rsp = self.client.get(&url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .timeout(endpoint.get_timeout(&self.config))
            .send()
            .await?;
        let status = rsp.status();
        let body = rsp.bytes().await?;
        log::info!("[REST] Call {url} {status} {:.2?}", before.elapsed());

        if !status.is_success() {
            return Err(UpstreamError::Http { status, body: String::from_utf8_lossy(&body).into_owned() });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches `endpoint` and stores the untouched payload before anyone reads it.
    pub async fn fetch_and_store(&self, endpoint: &Endpoint, snapshots: &dyn SnapshotWriter) -> Result<Value, ApiError> {
        let raw = self.get_call(endpoint).await.map_err(|e| {
            log::error!("[REST] {endpoint} failed: {e}");
            ApiError::from_upstream(endpoint, e)
        })?;
        snapshots.save(&endpoint.snapshot_name(&Local::now()), &raw);
        Ok(raw)
    }
}
