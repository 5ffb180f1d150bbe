use serde_json::Value;

use crate::models::StringOrNum;

use super::{list, scalar, text};

/// `typeMatches[].seriesMatches[].seriesAdWrapper.matches[].matchInfo`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveMatchesRsp {
    pub type_matches: Vec<TypeMatch>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeMatch {
    pub series_matches: Vec<SeriesMatch>,
}

/// Series groups without a `seriesAdWrapper` are ad slots and carry no matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesMatch {
    pub matches: Vec<MatchInfo>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchInfo {
    pub match_id: Option<StringOrNum>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub status: Option<String>,
}

impl From<&Value> for LiveMatchesRsp {
    fn from(raw: &Value) -> Self {
        LiveMatchesRsp {
            type_matches: list(raw, "typeMatches").iter().map(TypeMatch::from).collect(),
        }
    }
}

impl From<&Value> for TypeMatch {
    fn from(raw: &Value) -> Self {
        TypeMatch {
            series_matches: list(raw, "seriesMatches").iter().map(SeriesMatch::from).collect(),
        }
    }
}

impl From<&Value> for SeriesMatch {
    fn from(raw: &Value) -> Self {
        let matches = raw.get("seriesAdWrapper")
            .map(|wrapper| list(wrapper, "matches"))
            .unwrap_or_default();
        SeriesMatch {
            matches: matches.iter()
                .filter_map(|game| game.get("matchInfo"))
                .filter(|info| info.is_object())
                .map(MatchInfo::from)
                .collect(),
        }
    }
}

impl From<&Value> for MatchInfo {
    fn from(raw: &Value) -> Self {
        MatchInfo {
            match_id: scalar(raw, "matchId"),
            team1: raw.get("team1").and_then(|t| text(t, "teamName")),
            team2: raw.get("team2").and_then(|t| text(t, "teamName")),
            status: text(raw, "status"),
        }
    }
}

impl LiveMatchesRsp {
    /// Depth first, in upstream order.
    pub fn match_infos(&self) -> impl Iterator<Item = &MatchInfo> {
        self.type_matches.iter()
            .flat_map(|t| t.series_matches.iter())
            .flat_map(|s| s.matches.iter())
    }
}
