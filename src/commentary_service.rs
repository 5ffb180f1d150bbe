use bounded_vec_deque::BoundedVecDeque;
use serde_json::Value;
use tracing::log;

use crate::error::ApiError;
use crate::models::Endpoint;
use crate::models_api::commentary::CommentaryEntry;
use crate::models_external::commentary::CommentaryRsp;
use crate::rest_client::RestClient;
use crate::snapshot_store::SnapshotWriter;

/// Fixed window over the feed, counted before malformed entries are dropped.
pub const COMMENTARY_WINDOW: usize = 15;

pub struct CommentaryService;

impl CommentaryService {
    pub async fn update(client: &RestClient, snapshots: &dyn SnapshotWriter, endpoint: &Endpoint) -> Result<Vec<CommentaryEntry>, ApiError> {
        let raw = client.fetch_and_store(endpoint, snapshots).await?;
        let entries = CommentaryService::normalize(&raw);
        log::info!("[COMMENTARY] Prepared {} entries for {endpoint}", entries.len());
        Ok(entries)
    }

    /// Last `COMMENTARY_WINDOW` entries, most recent first.
    pub fn normalize(raw: &Value) -> Vec<CommentaryEntry> {
        let rsp = CommentaryRsp::from(raw);
        if rsp.malformed_count() > 0 {
            log::debug!("[COMMENTARY] {} malformed entries in feed", rsp.malformed_count());
        }
        let mut window = BoundedVecDeque::new(COMMENTARY_WINDOW);
        for item in &rsp.items {
            window.push_back(item.as_ref());
        }
        window.iter()
            .rev()
            .filter_map(|item| *item)
            .map(CommentaryEntry::from)
            .collect()
    }
}
