use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use assert_cmd::prelude::CommandCargoExt;
use cricket_proxy_rs::config_handler::Config;
use predicates::Predicate;
use reqwest::Response;

use super::external_server::{API_HOST, API_KEY};

pub struct CricketServer {
    port: u16,
    child_process: Option<Child>,
}

impl Drop for CricketServer {
    fn drop(&mut self) {
        if let Some(child) = self.child_process.as_mut() {
            child.kill().expect("Should kill");
        }
    }
}

impl CricketServer {
    pub fn new(port: u16) -> CricketServer {
        CricketServer { port, child_process: None }
    }

    /// Starts the binary with its config written to `path/config.json`.
    pub async fn start(&mut self, path: &Path, data_dir: &Path, external_url: &str) {
        let config = Config {
            port: self.port,
            api_url: external_url.to_string(),
            api_host: API_HOST.to_string(),
            api_key: API_KEY.to_string(),
            data_dir: data_dir.to_str().unwrap().to_string(),
            live_timeout_s: 2,
            scorecard_timeout_s: 2,
            commentary_timeout_s: 1,
        };

        let config_str = serde_json::to_string(&config).unwrap();
        let config_path = path.join("config.json");
        std::fs::write(&config_path, config_str).unwrap();
        let child_process = Command::cargo_bin("cricket-proxy-rs")
            .unwrap()
            .env("CONFIG_PATH", config_path)
            .env_remove("PORT")
            .env_remove("API_URL")
            .env_remove("RAPIDAPI_HOST")
            .env_remove("RAPIDAPI_KEY")
            .env_remove("DATA_DIR")
            .spawn()
            .expect("should start");
        self.child_process = Some(child_process);

        self.wait_until_up().await;
    }

    async fn wait_until_up(&self) {
        let is_up = predicates::function::function(|res: &Result<Response, reqwest::Error>| res.is_ok());
        for _ in 0..100 {
            let res = reqwest::get(self.url("/scorecard/ping-invalid!")).await;
            if is_up.eval(&res) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        panic!("server did not start");
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://localhost:{}{}", self.port, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response, Box<dyn std::error::Error>> {
        Ok(reqwest::get(self.url(path)).await?)
    }
}

/// File names in `dir` starting with `prefix`.
pub fn snapshots(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    files.retain(|p| p.file_name().and_then(|n| n.to_str()).map(|n| n.starts_with(prefix)).unwrap_or(false));
    files.sort();
    files
}
