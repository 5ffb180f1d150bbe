use serde_json::Value;
use tracing::log;

use crate::error::ApiError;
use crate::models::Endpoint;
use crate::models_api::match_summary::MatchSummary;
use crate::models_external::live_matches::LiveMatchesRsp;
use crate::rest_client::RestClient;
use crate::snapshot_store::SnapshotWriter;

pub struct LiveMatchService;

impl LiveMatchService {
    pub async fn update(client: &RestClient, snapshots: &dyn SnapshotWriter) -> Result<Vec<MatchSummary>, ApiError> {
        let raw = client.fetch_and_store(&Endpoint::LiveMatches, snapshots).await?;
        let matches = LiveMatchService::normalize(&raw);
        log::info!("[LIVE] Found {} live matches", matches.len());
        Ok(matches)
    }

    pub fn normalize(raw: &Value) -> Vec<MatchSummary> {
        LiveMatchesRsp::from(raw)
            .match_infos()
            .filter_map(MatchSummary::from_info)
            .collect()
    }
}
