use crate::error::{CoreError, Result};
use crate::io::atomic_write;
use gsheets_client::SheetsAuth;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const CONFIG_FILE: &str = "charsheet.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_root_url")]
    pub root_url: String,
    #[serde(default)]
    pub oauth_authorize_url: String,
    #[serde(default)]
    pub oauth_token_url: String,
    #[serde(default)]
    pub oauth_identity_url: String,
    #[serde(default)]
    pub oauth_client_id: String,
    #[serde(default)]
    pub oauth_client_secret: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            oauth_authorize_url: String::new(),
            oauth_token_url: String::new(),
            oauth_identity_url: String::new(),
            oauth_client_id: String::new(),
            oauth_client_secret: String::new(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default)]
    pub dm_sheet_url: String,
    #[serde(default)]
    pub service_account_email: String,
    #[serde(default)]
    pub google_api_key: String,
    #[serde(default)]
    pub web: WebConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            dm_sheet_url: String::new(),
            service_account_email: String::new(),
            google_api_key: String::new(),
            web: WebConfig::default(),
        }
    }
}

fn default_data_file() -> String {
    "userdata.yaml".to_string()
}

fn default_root_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_port() -> u16 {
    8787
}

impl Config {
    /// Load `charsheet.yaml` from the project root. The `GOOGLE_API_KEY`
    /// environment variable overrides the stored key.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Err(CoreError::NotConfigured);
        }
        let data = std::fs::read_to_string(&path)?;
        let mut config: Config = serde_yaml::from_str(&data)?;
        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            if !key.is_empty() {
                config.google_api_key = key;
            }
        }
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        atomic_write(&root.join(CONFIG_FILE), data.as_bytes())
    }

    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }

    pub fn auth(&self) -> SheetsAuth {
        SheetsAuth::ApiKey(self.google_api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_not_configured() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(CoreError::NotConfigured)
        ));
    }

    #[test]
    fn defaults_fill_sparse_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "dm_sheet_url: https://docs.google.com/spreadsheets/d/dm123\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.data_file, "userdata.yaml");
        assert_eq!(config.web.port, 8787);
        assert!(config.dm_sheet_url.contains("dm123"));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            service_account_email: "bot@example.iam.gserviceaccount.com".to_string(),
            ..Config::default()
        };
        config.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.service_account_email, config.service_account_email);
        assert_eq!(loaded.data_file, "userdata.yaml");
    }

    #[test]
    fn data_path_joins_root() {
        let config = Config::default();
        assert_eq!(
            config.data_path(Path::new("/srv/bot")),
            PathBuf::from("/srv/bot/userdata.yaml")
        );
    }
}
