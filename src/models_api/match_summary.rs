use serde::{Deserialize, Serialize};

use crate::models_external::live_matches::MatchInfo;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub match_id: String,
    pub team1: String,
    pub team2: String,
    pub status: String,
}

impl MatchSummary {
    /// `None` when the upstream entry carries no usable match id.
    pub fn from_info(info: &MatchInfo) -> Option<MatchSummary> {
        let match_id = info.match_id.as_ref().filter(|id| !id.is_blank())?;
        Some(MatchSummary {
            match_id: match_id.to_str(),
            team1: info.team1.clone().unwrap_or_else(|| "TBD".to_string()),
            team2: info.team2.clone().unwrap_or_else(|| "TBD".to_string()),
            status: info.status.clone().unwrap_or_else(|| "Status unavailable".to_string()),
        })
    }
}
