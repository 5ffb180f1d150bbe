use std::sync::Arc;

use cricket_proxy_rs::api::{Api, ApiState};
use cricket_proxy_rs::config_handler;
use tracing::log;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(filter)
        .init();

    let config = Arc::new(config_handler::get_config()?);
    log::info!("[CONFIG] {:?}", config);

    Api::serve(ApiState::new(config)).await
}
