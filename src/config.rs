// Configuration module: the test constants the tool fills requests with.
// Defaults match the local test machine the service is usually run on;
// a JSON file and an environment variable can point it elsewhere.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "IALCTL_CONFIG";
/// Environment variable overriding `server_url`.
pub const SERVER_URL_ENV: &str = "IALCTL_SERVER_URL";

/// Everything a command may need besides the user's sub-choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the service, without a trailing path.
    pub server_url: String,
    pub room_id: String,
    /// Input locators selectable as choices 1, 2, 3...
    pub inputs: Vec<String>,
    /// Base path the service derives output locations from.
    pub output_base_url: String,
    pub outputs: OutputPresets,
    /// Image used when the background prompt is answered with `1`.
    pub background_image_url: String,
}

/// The output settings the service is expected to know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPresets {
    pub hd720: OutputPreset,
    pub hd1080: OutputPreset,
    pub udp720: OutputPreset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPreset {
    pub setting_id: String,
    /// Explicit destination. When absent the service builds one from the
    /// room's output base url.
    #[serde(default)]
    pub url: Option<String>,
}

impl OutputPreset {
    fn new(setting_id: &str, url: Option<&str>) -> Self {
        OutputPreset {
            setting_id: setting_id.to_string(),
            url: url.map(str::to_string),
        }
    }

    /// Destinations to send along with this preset; empty when none is set.
    pub fn urls(&self) -> Vec<String> {
        self.url.iter().cloned().collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: "http://127.0.0.1:8080".into(),
            room_id: "ial_test".into(),
            inputs: vec![
                "bunny.avi".into(),
                "soccer_adidas_ad.mp4".into(),
                "nba_ad.mp4".into(),
            ],
            output_base_url: "./".into(),
            outputs: OutputPresets::default(),
            background_image_url: "../../../asset/ffdynamic-bg2.jpg".into(),
        }
    }
}

impl Default for OutputPresets {
    fn default() -> Self {
        OutputPresets {
            hd720: OutputPreset::new("720p_2000kb", Some("output_720p.flv")),
            hd1080: OutputPreset::new("1080p_4000kb", None),
            udp720: OutputPreset::new("udp_720p", Some("udp://127.0.0.1:12345")),
        }
    }
}

impl Default for OutputPreset {
    fn default() -> Self {
        OutputPreset::new("", None)
    }
}

impl Config {
    /// Build the effective configuration: defaults, then the config file,
    /// then `IALCTL_SERVER_URL`.
    pub fn load() -> Result<Self> {
        Config::load_with(|key| std::env::var(key).ok(), dirs::config_dir())
    }

    /// `load` with the environment lookup and the user config dir supplied
    /// by the caller. A file named by `IALCTL_CONFIG` must exist; the one
    /// under the config dir is optional. A blank server url is ignored.
    pub fn load_with<F>(lookup: F, config_dir: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => Config::from_file(Path::new(&path))
                .with_context(|| format!("{CONFIG_PATH_ENV} is set to {path}"))?,
            None => match config_dir.map(|dir| dir.join("ialctl").join("config.json")) {
                Some(path) if path.exists() => Config::from_file(&path)?,
                _ => Config::default(),
            },
        };
        if let Some(url) = lookup(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url;
            }
        }
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Config::from_json(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Input locator for a 1-based menu choice.
    pub fn input(&self, choice: usize) -> Option<&str> {
        choice
            .checked_sub(1)
            .and_then(|idx| self.inputs.get(idx))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_test_service() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://127.0.0.1:8080");
        assert_eq!(config.room_id, "ial_test");
        assert_eq!(config.inputs.len(), 3);
        assert_eq!(config.outputs.hd720.urls(), vec!["output_720p.flv"]);
        assert!(config.outputs.hd1080.urls().is_empty());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config = Config::from_json(
            r#"{ "server_url": "http://media-box:9000", "outputs": { "hd1080": { "setting_id": "1080p_8000kb" } } }"#,
        )
        .unwrap();

        assert_eq!(config.server_url, "http://media-box:9000");
        assert_eq!(config.room_id, "ial_test");
        assert_eq!(config.outputs.hd1080.setting_id, "1080p_8000kb");
        assert_eq!(config.outputs.hd1080.url, None);
        assert_eq!(config.outputs.udp720.setting_id, "udp_720p");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
    }

    #[test]
    fn input_choice_is_one_based() {
        let config = Config::default();
        assert_eq!(config.input(1), Some("bunny.avi"));
        assert_eq!(config.input(3), Some("nba_ad.mp4"));
        assert_eq!(config.input(0), None);
        assert_eq!(config.input(4), None);
    }

    #[test]
    fn from_file_reports_the_path() {
        let path = std::env::temp_dir().join("ialctl-missing-config-for-test.json");
        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("ialctl-missing-config-for-test.json"));
    }

    fn write_temp_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ialctl-{}-{name}.json", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    fn env_of(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
        move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn config_file_then_server_url_env() {
        let path = write_temp_config(
            "precedence",
            r#"{ "server_url": "http://from-file:9000", "room_id": "night_show" }"#,
        );
        let config = Config::load_with(
            env_of(vec![
                (CONFIG_PATH_ENV, path.display().to_string()),
                (SERVER_URL_ENV, "http://from-env:7000".to_string()),
            ]),
            None,
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.room_id, "night_show");
        assert_eq!(config.server_url, "http://from-env:7000");
        assert_eq!(config.inputs, Config::default().inputs);
    }

    #[test]
    fn blank_server_url_env_is_ignored() {
        let path = write_temp_config("blank-url", r#"{ "server_url": "http://from-file:9000" }"#);
        let config = Config::load_with(
            env_of(vec![
                (CONFIG_PATH_ENV, path.display().to_string()),
                (SERVER_URL_ENV, "   ".to_string()),
            ]),
            None,
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server_url, "http://from-file:9000");
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let err = Config::load_with(
            env_of(vec![(CONFIG_PATH_ENV, "/nonexistent/ialctl-config.json".to_string())]),
            None,
        )
        .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(CONFIG_PATH_ENV));
        assert!(msg.contains("/nonexistent/ialctl-config.json"));
    }

    #[test]
    fn user_config_dir_file_is_optional() {
        let empty_dir = std::env::temp_dir().join(format!("ialctl-no-config-{}", std::process::id()));
        let config = Config::load_with(env_of(vec![]), Some(empty_dir)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn user_config_dir_file_is_read() {
        let dir = std::env::temp_dir().join(format!("ialctl-config-dir-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("ialctl")).unwrap();
        std::fs::write(dir.join("ialctl").join("config.json"), r#"{ "room_id": "lobby" }"#).unwrap();

        let config = Config::load_with(env_of(vec![]), Some(dir.clone())).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.room_id, "lobby");
        assert_eq!(config.server_url, "http://127.0.0.1:8080");
    }
}
