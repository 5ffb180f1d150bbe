use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt::Display;
use std::time::Duration;

use crate::config_handler::Config;
use crate::error::ApiError;

/// Upstream endpoints, each one a page of the provider's match center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    LiveMatches,
    Scorecard(String),
    Commentary(String),
}

impl Endpoint {
    pub fn scorecard(match_id: &str) -> Result<Endpoint, ApiError> {
        Ok(Endpoint::Scorecard(valid_match_id(match_id)?))
    }

    pub fn commentary(match_id: &str) -> Result<Endpoint, ApiError> {
        Ok(Endpoint::Commentary(valid_match_id(match_id)?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::LiveMatches => "live_matches",
            Endpoint::Scorecard(_) => "scorecard",
            Endpoint::Commentary(_) => "commentary",
        }
    }

    /// Used in user facing error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Endpoint::LiveMatches => "live matches",
            Endpoint::Scorecard(_) => "scorecard",
            Endpoint::Commentary(_) => "commentary",
        }
    }

    pub fn match_id(&self) -> Option<&str> {
        match self {
            Endpoint::LiveMatches => None,
            Endpoint::Scorecard(id) | Endpoint::Commentary(id) => Some(id.as_str()),
        }
    }

    pub fn get_url(&self, config: &Config) -> String {
        let base = config.api_url.trim_end_matches('/');
        match self {
            Endpoint::LiveMatches => format!("{base}/matches/v1/live"),
            Endpoint::Scorecard(id) => format!("{base}/mcenter/v1/{id}/scard"),
            Endpoint::Commentary(id) => format!("{base}/mcenter/v1/{id}/comm"),
        }
    }

    pub fn get_timeout(&self, config: &Config) -> Duration {
        let secs = match self {
            Endpoint::LiveMatches => config.live_timeout_s,
            Endpoint::Scorecard(_) => config.scorecard_timeout_s,
            Endpoint::Commentary(_) => config.commentary_timeout_s,
        };
        Duration::from_secs(secs)
    }

    /// `{endpoint}[_{match_id}]_{YYYYMMDD_HHMMSS}.json`
    pub fn snapshot_name<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        let ts = now.format("%Y%m%d_%H%M%S");
        match self.match_id() {
            Some(id) => format!("{}_{id}_{ts}.json", self.name()),
            None => format!("{}_{ts}.json", self.name()),
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.match_id() {
            Some(id) => write!(f, "{}/{id}", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

fn valid_match_id(match_id: &str) -> Result<String, ApiError> {
    let valid = !match_id.is_empty()
        && match_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(match_id.to_string())
    } else {
        Err(ApiError::InvalidMatchId(match_id.to_string()))
    }
}

/// Scalar the provider sends either as a JSON string or as a JSON number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrNum {
    String(String),
    Number(Number),
}

impl StringOrNum {
    pub fn from_value(value: &Value) -> Option<StringOrNum> {
        match value {
            Value::String(s) => Some(StringOrNum::String(s.clone())),
            Value::Number(n) => Some(StringOrNum::Number(n.clone())),
            _ => None,
        }
    }

    pub fn to_num(&self) -> i64 {
        match self {
            StringOrNum::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or(0)
            },
            StringOrNum::Number(n) => n.as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            StringOrNum::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            StringOrNum::Number(n) => n.as_f64().unwrap_or(0.0),
        }
    }

    pub fn to_number(&self) -> Option<Number> {
        match self {
            StringOrNum::Number(n) => Some(n.clone()),
            StringOrNum::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().map(Number::from)
                    .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
            },
        }
    }

    pub fn to_str(&self) -> String {
        match self {
            StringOrNum::String(s) => s.to_owned(),
            StringOrNum::Number(n) => n.to_string(),
        }
    }

    /// Empty strings and zero are not usable identifiers.
    pub fn is_blank(&self) -> bool {
        match self {
            StringOrNum::String(s) => s.is_empty(),
            StringOrNum::Number(n) => n.as_f64() == Some(0.0),
        }
    }
}
