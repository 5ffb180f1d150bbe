use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::Endpoint;

/// Failure of a single upstream round trip.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream responded {status}")]
    Http { status: StatusCode, body: String },
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors a request handler turns into a user visible response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    UpstreamHttp { status: StatusCode, message: String },
    #[error("Network Error connecting to API for {what}: {detail}")]
    UpstreamNetwork { what: &'static str, detail: String },
    #[error("Failed to parse {what} API response (invalid JSON).")]
    UpstreamDecode { what: &'static str },
    #[error("Invalid match id: {0}")]
    InvalidMatchId(String),
}

impl ApiError {
    pub fn from_upstream(endpoint: &Endpoint, err: UpstreamError) -> ApiError {
        let what = endpoint.describe();
        match err {
            UpstreamError::Http { status, body } => {
                let message = upstream_message(&body).unwrap_or_else(|| format!(
                    "API Error fetching {what}: Status {}. Check API key/endpoint/plan or match ID.",
                    status.as_u16()
                ));
                ApiError::UpstreamHttp { status, message }
            },
            UpstreamError::Network(e) => ApiError::UpstreamNetwork { what, detail: e.to_string() },
            UpstreamError::Decode(_) => ApiError::UpstreamDecode { what },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UpstreamHttp { status, .. } => *status,
            ApiError::InvalidMatchId(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamNetwork { .. } | ApiError::UpstreamDecode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The provider wraps its errors as `{"message": "..."}`.
pub fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
