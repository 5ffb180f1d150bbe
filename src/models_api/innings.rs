use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::StringOrNum;
use crate::models_external::scorecard::Innings;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InningsSummary {
    pub team: String,
    /// `runs/wickets`
    pub score: String,
    pub overs: String,
    pub batsmen: Vec<BatsmanStat>,
    pub bowlers: Vec<BowlerStat>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatsmanStat {
    pub name: String,
    pub runs: i64,
    pub balls: i64,
    pub fours: i64,
    pub sixes: i64,
    pub strike_rate: f64,
    pub dismissal: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BowlerStat {
    pub name: String,
    pub overs: String,
    pub maidens: i64,
    pub runs: i64,
    pub wickets: i64,
    pub economy: f64,
}

impl From<&Innings> for InningsSummary {
    fn from(innings: &Innings) -> Self {
        let runs = innings.runs.as_ref().map(StringOrNum::to_str).unwrap_or_else(|| "0".to_string());
        let wickets = innings.wickets.as_ref().map(StringOrNum::to_str).unwrap_or_else(|| "0".to_string());
        InningsSummary {
            team: innings.bat_team_name.clone().unwrap_or_else(|| "Unknown Team".to_string()),
            score: format!("{runs}/{wickets}"),
            overs: overs_or_default(innings.overs.as_ref()),
            batsmen: innings.batsmen.entries().into_iter().map(BatsmanStat::from).collect(),
            bowlers: innings.bowlers.entries().into_iter().map(BowlerStat::from).collect(),
        }
    }
}

impl From<&Map<String, Value>> for BatsmanStat {
    fn from(player: &Map<String, Value>) -> Self {
        BatsmanStat {
            name: name(player, "batName"),
            runs: num(player, "runs"),
            balls: num(player, "balls"),
            fours: num(player, "fours"),
            sixes: num(player, "sixes"),
            strike_rate: float(player, "strikeRate"),
            dismissal: name(player, "outDesc"),
        }
    }
}

impl From<&Map<String, Value>> for BowlerStat {
    fn from(player: &Map<String, Value>) -> Self {
        BowlerStat {
            name: name(player, "bowlName"),
            overs: overs_or_default(player.get("overs").and_then(StringOrNum::from_value).as_ref()),
            maidens: num(player, "maidens"),
            runs: num(player, "runs"),
            wickets: num(player, "wickets"),
            economy: float(player, "economy"),
        }
    }
}

fn overs_or_default(overs: Option<&StringOrNum>) -> String {
    overs.map(StringOrNum::to_str).unwrap_or_else(|| "0.0".to_string())
}

fn name(player: &Map<String, Value>, key: &str) -> String {
    player.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn num(player: &Map<String, Value>, key: &str) -> i64 {
    player.get(key).and_then(StringOrNum::from_value).map(|e| e.to_num()).unwrap_or(0)
}

fn float(player: &Map<String, Value>, key: &str) -> f64 {
    player.get(key).and_then(StringOrNum::from_value).map(|e| e.to_f64()).unwrap_or(0.0)
}
