use std::fmt::Display;

use tracing::log;

pub mod api;
pub mod commentary_service;
pub mod config_handler;
pub mod error;
pub mod live_match_service;
pub mod models;
pub mod models_api;
pub mod models_external;
pub mod render;
pub mod rest_client;
pub mod scorecard_service;
pub mod snapshot_store;

pub trait LogResult<T, E: Display> {
    fn ok_log(self, msg: &str) -> Option<T>;
}

impl<T, E: Display> LogResult<T, E> for Result<T, E> {
    fn ok_log(self, msg: &str) -> Option<T> {
        match self {
            Ok(o) => Some(o),
            Err(e) => {
                log::error!("{}: {}", msg, e);
                None
            }
        }
    }
}
