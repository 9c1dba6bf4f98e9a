use std::{fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_DIRECTORY_BASE_URL: &str = "https://api.metadataapi.net";
pub const LOCAL_DATA_DIR: &str = ".mirror";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub directory_base_url: String,
    pub directory_api_key: Option<String>,
    pub data_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            directory_base_url: DEFAULT_DIRECTORY_BASE_URL.to_string(),
            directory_api_key: None,
            data_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    backend_base_url: Option<String>,
    directory_base_url: Option<String>,
    directory_api_key: Option<String>,
    data_dir: Option<String>,
}

pub fn load_config() -> AppConfig {
    let cfg_path = PathBuf::from("config.json");
    let mut cfg = AppConfig::default();

    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(url) = parsed.backend_base_url {
                    cfg.backend_base_url = url;
                }
                if let Some(url) = parsed.directory_base_url {
                    cfg.directory_base_url = url;
                }
                if parsed.directory_api_key.is_some() {
                    cfg.directory_api_key = parsed.directory_api_key;
                }
                if parsed.data_dir.is_some() {
                    cfg.data_dir = parsed.data_dir;
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!("Failed to parse config.json ({}). Using defaults.", err);
            }
        },
        Err(_) => {
            info!("No config.json found; using defaults");
        }
    }

    if cfg.directory_api_key.is_none() {
        warn!("directory_api_key not set in config.json; actress profiles will be unavailable.");
    }

    cfg
}

pub fn data_dir_path(cfg: &AppConfig) -> PathBuf {
    PathBuf::from(cfg.data_dir.clone().unwrap_or_else(|| LOCAL_DATA_DIR.to_string()))
}
