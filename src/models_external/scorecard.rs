use serde_json::{Map, Value};
use tracing::log;

use crate::models::StringOrNum;

use super::{scalar, text, type_name, ListField};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScorecardRsp {
    pub innings: Vec<Innings>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Innings {
    pub bat_team_name: Option<String>,
    pub runs: Option<StringOrNum>,
    pub wickets: Option<StringOrNum>,
    pub overs: Option<StringOrNum>,
    pub batsmen: PlayerList,
    pub bowlers: PlayerList,
}

/// The provider sends player tables either as a list or as a mapping keyed by player id.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayerList {
    Sequence(Vec<Value>),
    Keyed(Map<String, Value>),
    #[default]
    Empty,
}

impl PlayerList {
    pub fn read(details: Option<&Value>, key: &str) -> PlayerList {
        match details.and_then(|d| d.get(key)) {
            Some(Value::Array(items)) => PlayerList::Sequence(items.clone()),
            Some(Value::Object(keyed)) => PlayerList::Keyed(keyed.clone()),
            None | Some(Value::Null) => PlayerList::Empty,
            Some(other) => {
                log::warn!("[SCORECARD] Expected '{key}' to be a list or mapping, got {}", type_name(other));
                PlayerList::Empty
            },
        }
    }

    /// Well formed player entries in list order, or in key order for the keyed form.
    pub fn entries(&self) -> Vec<&Map<String, Value>> {
        let values: Box<dyn Iterator<Item = &Value> + '_> = match self {
            PlayerList::Sequence(items) => Box::new(items.iter()),
            PlayerList::Keyed(keyed) => Box::new(keyed.values()),
            PlayerList::Empty => Box::new(std::iter::empty()),
        };
        values.filter_map(Value::as_object).collect()
    }
}

impl From<&Value> for ScorecardRsp {
    fn from(raw: &Value) -> Self {
        let field = ListField::read(raw, "scoreCard");
        if let ListField::WrongType(found) = field {
            log::warn!("[SCORECARD] Expected 'scoreCard' to be a list, got {found}");
        }
        let innings = field.items().iter()
            .enumerate()
            .filter_map(|(index, innings)| {
                if innings.is_object() {
                    Some(Innings::from(innings))
                } else {
                    log::warn!("[SCORECARD] Skipping innings at index {index}, got {}", type_name(innings));
                    None
                }
            })
            .collect();
        ScorecardRsp { innings }
    }
}

impl From<&Value> for Innings {
    fn from(raw: &Value) -> Self {
        let bat_team = raw.get("batTeamDetails");
        let bowl_team = raw.get("bowlTeamDetails");
        let score = raw.get("scoreDetails");
        Innings {
            bat_team_name: bat_team.and_then(|t| text(t, "batTeamName")),
            runs: score.and_then(|s| scalar(s, "runs")),
            wickets: score.and_then(|s| scalar(s, "wickets")),
            overs: score.and_then(|s| scalar(s, "overs")),
            batsmen: PlayerList::read(bat_team, "batsmenData"),
            bowlers: PlayerList::read(bowl_team, "bowlersData"),
        }
    }
}
