use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::SendMode;
use crate::guestbook::submit::DEFAULT_STATUS_HIDE;

pub const DEFAULT_CONFIG_PATH: &str = "config/guestbook.json";
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbxvdNtQXTPg2voiPpp2rRN6Bj6YTP_qQUnSLx4_U5P9PZYo-kejhqi-Y12dlaW0AVY4KA/exec";
pub const DEFAULT_CACHE_PATH: &str = "data/guestbook.db";

const ENDPOINT_VAR: &str = "GUESTBOOK_ENDPOINT";
const PASSWORD_GATE_VAR: &str = "GUESTBOOK_PASSWORD_GATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub send_mode: SendMode,
    pub cache_enabled: bool,
    pub cache_path: String,
    pub password_gate: bool,
    pub status_hide_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            send_mode: SendMode::default(),
            cache_enabled: true,
            cache_path: DEFAULT_CACHE_PATH.to_string(),
            password_gate: false,
            status_hide_ms: DEFAULT_STATUS_HIDE.as_millis() as u64,
            refresh_interval_secs: None,
        }
    }
}

impl AppConfig {
    pub fn status_hide(&self) -> Duration {
        Duration::from_millis(self.status_hide_ms)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Apply `GUESTBOOK_*` environment variables on top of the file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            env::var(ENDPOINT_VAR).ok(),
            env::var(PASSWORD_GATE_VAR).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, password_gate: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            log::info!("{ENDPOINT_VAR} set, overriding endpoint");
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(flag) = password_gate {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.password_gate = true,
                "0" | "false" | "no" | "off" => self.password_gate = false,
                other => log::warn!("Invalid {PASSWORD_GATE_VAR} value `{other}`, ignoring"),
            }
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    crate::storage::ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"send_mode": "optimistic", "password_gate": true}"#).unwrap();

        assert_eq!(config.send_mode, SendMode::Optimistic);
        assert!(config.password_gate);
        assert!(config.cache_enabled);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.status_hide(), Duration::from_millis(3000));
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config("does/not/exist/guestbook.json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some(" https://example.test/exec ".into()), Some("YES".into()));
        assert_eq!(config.endpoint, "https://example.test/exec");
        assert!(config.password_gate);

        config.apply_overrides(Some("   ".into()), Some("maybe".into()));
        assert_eq!(config.endpoint, "https://example.test/exec");
        assert!(config.password_gate);
    }

    #[test]
    fn zero_refresh_interval_disables_refresh() {
        let config = AppConfig {
            refresh_interval_secs: Some(0),
            ..AppConfig::default()
        };
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = env::temp_dir().join(format!("guestbook-config-{}", std::process::id()));
        let path = dir.join("guestbook.json");
        let path = path.to_str().unwrap();
        let config = AppConfig {
            refresh_interval_secs: Some(30),
            ..AppConfig::default()
        };

        save_config(path, &config).unwrap();
        assert_eq!(load_config(path), config);
        fs::remove_dir_all(dir).ok();
    }
}
