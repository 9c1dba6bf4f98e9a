// src/app/api.rs
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::app::data::{
    DiagnosticSnapshot, Envelope, Film, ImportCandidate, PerformerHit, PerformerProfile,
};
use crate::config::AppConfig;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the co-located library backend.
#[derive(Clone)]
pub struct BackendClient {
    base: String,
    client: Client,
}

impl BackendClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent("mirror/ui")
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| format!("http client: {e}"))?;
        Ok(Self {
            base: cfg.backend_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}{}", self.base, path);
        self.client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("GET {url}: {e}"))?
            .json::<T>()
            .map_err(|e| format!("decode {url}: {e}"))
    }

    pub fn fetch_films(&self) -> Result<Vec<Film>, String> {
        self.get_json("/api/films")
    }

    pub fn fetch_actresses(&self) -> Result<Vec<String>, String> {
        self.get_json("/api/actresses")
    }

    pub fn fetch_imports(&self) -> Result<Vec<ImportCandidate>, String> {
        self.get_json("/api/imports")
    }

    pub fn fetch_diagnostics(&self) -> Result<DiagnosticSnapshot, String> {
        self.get_json("/api/diagnostics")
    }

    pub fn thumbnail_url(&self, uuid: &str) -> String {
        format!("{}/api/thumbnail?uuid={}", self.base, urlencoding::encode(uuid))
    }
}

/// Seam between the resolver and the third-party performer directory, so the
/// resolution algorithm is testable without a network.
pub trait PerformerDirectory {
    fn search(&self, name: &str) -> Result<Vec<PerformerHit>, String>;
    fn profile(&self, id: &str) -> Result<PerformerProfile, String>;
    fn portrait(&self, url: &str) -> Result<Vec<u8>, String>;
}

#[derive(Clone)]
pub struct DirectoryClient {
    base: String,
    api_key: Option<String>,
    client: Client,
}

impl DirectoryClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent("mirror/directory")
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| format!("http client: {e}"))?;
        Ok(Self {
            base: cfg.directory_base_url.trim_end_matches('/').to_string(),
            api_key: cfg.directory_api_key.clone(),
            client,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "directory_api_key not configured".to_string())?;
        self.client
            .get(url)
            .bearer_auth(key)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("GET {url}: {e}"))?
            .json::<T>()
            .map_err(|e| format!("decode {url}: {e}"))
    }
}

impl PerformerDirectory for DirectoryClient {
    fn search(&self, name: &str) -> Result<Vec<PerformerHit>, String> {
        let url = format!("{}/performers?q={}", self.base, urlencoding::encode(name));
        self.get_json::<Envelope<Vec<PerformerHit>>>(&url)
            .map(|env| env.data)
    }

    fn profile(&self, id: &str) -> Result<PerformerProfile, String> {
        let url = format!("{}/performers/{}", self.base, urlencoding::encode(id));
        self.get_json::<Envelope<PerformerProfile>>(&url)
            .map(|env| env.data)
    }

    fn portrait(&self, url: &str) -> Result<Vec<u8>, String> {
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map(|b| b.to_vec())
            .map_err(|e| format!("GET {url}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AppConfig {
        AppConfig {
            backend_base_url: "http://127.0.0.1:8000/".to_string(),
            directory_base_url: "https://directory.example/".to_string(),
            directory_api_key: None,
            data_dir: None,
        }
    }

    #[test]
    fn thumbnail_url_encodes_uuid() {
        let backend = BackendClient::new(&cfg()).expect("client");
        assert_eq!(
            backend.thumbnail_url("ab cd"),
            "http://127.0.0.1:8000/api/thumbnail?uuid=ab%20cd"
        );
    }

    #[test]
    fn directory_without_key_refuses_lookup() {
        let directory = DirectoryClient::new(&cfg()).expect("client");
        let err = directory.search("Jane Doe").expect_err("no key configured");
        assert!(err.contains("directory_api_key"));
    }
}
