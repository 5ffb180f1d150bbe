use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs;

#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default="default_port")]
    pub port: u16,

    #[serde(default="default_api_url")]
    pub api_url: String,
    #[serde(default="default_api_host")]
    pub api_host: String,
    #[serde(default)]
    pub api_key: String,

    #[serde(default="default_data_dir")]
    pub data_dir: String,

    #[serde(default="default_short_timeout")]
    pub live_timeout_s: u64,
    #[serde(default="default_long_timeout")]
    pub scorecard_timeout_s: u64,
    #[serde(default="default_short_timeout")]
    pub commentary_timeout_s: u64,
}

fn default_port() -> u16 {
    5000
}

fn default_api_url() -> String {
    "https://cricbuzz-cricket.p.rapidapi.com".to_string()
}

fn default_api_host() -> String {
    "cricbuzz-cricket.p.rapidapi.com".to_string()
}

fn default_data_dir() -> String {
    "./api_data".to_string()
}

fn default_short_timeout() -> u64 {
    10
}

fn default_long_timeout() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            api_url: default_api_url(),
            api_host: default_api_host(),
            api_key: String::new(),
            data_dir: default_data_dir(),
            live_timeout_s: default_short_timeout(),
            scorecard_timeout_s: default_long_timeout(),
            commentary_timeout_s: default_short_timeout(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_url", &self.api_url)
            .field("api_host", &self.api_host)
            .field("api_key", &masked_key)
            .field("data_dir", &self.data_dir)
            .field("live_timeout_s", &self.live_timeout_s)
            .field("scorecard_timeout_s", &self.scorecard_timeout_s)
            .field("commentary_timeout_s", &self.commentary_timeout_s)
            .finish()
    }
}

/// Reads the optional JSON file at `CONFIG_PATH`, then applies env overrides.
pub fn get_config() -> anyhow::Result<Config> {
    let mut result = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Unable to read config file {path}"))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Could not parse JSON at {path}"))?
        },
        Err(_) => Config::default(),
    };
    apply_env(&mut result, |key| std::env::var(key).ok())?;

    if result.api_key.trim().is_empty() {
        bail!("No API key configured, set RAPIDAPI_KEY or api_key in the config file");
    }
    Ok(result)
}

fn apply_env<F: Fn(&str) -> Option<String>>(config: &mut Config, env: F) -> anyhow::Result<()> {
    if let Some(port) = env("PORT") {
        config.port = port.parse().with_context(|| format!("Invalid PORT {port}"))?;
    }
    if let Some(api_url) = env("API_URL") {
        config.api_url = api_url;
    }
    if let Some(api_host) = env("RAPIDAPI_HOST") {
        config.api_host = api_host;
    }
    if let Some(api_key) = env("RAPIDAPI_KEY") {
        config.api_key = api_key;
    }
    if let Some(data_dir) = env("DATA_DIR") {
        config.data_dir = data_dir;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{apply_env, Config};

    #[test]
    fn partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "api_key": "abc", "port": 8080 }"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.data_dir, "./api_data");
        assert_eq!(config.api_host, "cricbuzz-cricket.p.rapidapi.com");
        assert_eq!(config.scorecard_timeout_s, 15);
    }

    #[test]
    fn env_overrides() {
        let env = HashMap::from([
            ("PORT", "7000"),
            ("RAPIDAPI_KEY", "secret"),
            ("DATA_DIR", "/tmp/snapshots"),
        ]);
        let mut config = Config::default();
        apply_env(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.data_dir, "/tmp/snapshots");
        assert_eq!(config.api_url, "https://cricbuzz-cricket.p.rapidapi.com");
    }

    #[test]
    fn invalid_port() {
        let mut config = Config::default();
        assert!(apply_env(&mut config, |k| (k == "PORT").then(|| "abc".to_string())).is_err());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = Config { api_key: "very-secret".to_string(), ..Default::default() };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
