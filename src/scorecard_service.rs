use serde_json::Value;
use tracing::log;

use crate::error::ApiError;
use crate::models::Endpoint;
use crate::models_api::innings::InningsSummary;
use crate::models_external::scorecard::ScorecardRsp;
use crate::rest_client::RestClient;
use crate::snapshot_store::SnapshotWriter;

pub struct ScorecardService;

impl ScorecardService {
    pub async fn update(client: &RestClient, snapshots: &dyn SnapshotWriter, endpoint: &Endpoint) -> Result<Vec<InningsSummary>, ApiError> {
        let raw = client.fetch_and_store(endpoint, snapshots).await?;
        let innings = ScorecardService::normalize(&raw);
        log::info!("[SCORECARD] Prepared {} innings for {endpoint}", innings.len());
        Ok(innings)
    }

    pub fn normalize(raw: &Value) -> Vec<InningsSummary> {
        ScorecardRsp::from(raw).innings.iter()
            .map(InningsSummary::from)
            .collect()
    }
}
