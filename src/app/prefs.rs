// src/app/prefs.rs
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tracing::warn;

use crate::app::types::SortMode;
use crate::config::{data_dir_path, load_config};

static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let dir = data_dir_path(&load_config());
    if let Err(e) = fs::create_dir_all(&dir) {
        warn!("failed to create data dir {}: {e}", dir.display());
    }
    dir
});

pub fn prefs_path() -> PathBuf {
    DATA_DIR.join("ui_prefs.txt")
}

/// Durable key/value preferences (`key=value` lines, `#` comments).
///
/// Values are read back from disk at call time rather than cached, so a write
/// from one part of the app is visible to the next render pass everywhere.
/// The file is rewritten atomically on every change and never cleared.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn open_default() -> Self {
        Self { path: prefs_path() }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Active sort mode; unknown or missing values fall back to the default
    /// (newest-first) instead of failing the render.
    pub fn sort_mode(&self) -> SortMode {
        self.read_key("sorting_method")
            .and_then(|v| SortMode::from_str(&v))
            .unwrap_or_default()
    }

    pub fn set_sort_mode(&self, mode: SortMode) {
        self.write_key("sorting_method", mode.as_str());
    }

    pub fn poster_width(&self) -> Option<f32> {
        self.read_key("poster_w").and_then(|v| v.parse().ok())
    }

    pub fn set_poster_width(&self, width: f32) {
        self.write_key("poster_w", &format!("{width:.1}"));
    }

    fn read_key(&self, key: &str) -> Option<String> {
        let txt = fs::read_to_string(&self.path).ok()?;
        parse_kv(&txt)
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn write_key(&self, key: &str, value: &str) {
        let txt = fs::read_to_string(&self.path).unwrap_or_default();
        let mut entries = parse_kv(&txt);
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        if let Err(e) = write_atomic(&self.path, &entries) {
            warn!("failed to write prefs {}: {e}", self.path.display());
        }
    }
}

fn parse_kv(txt: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        out.push((k.trim().to_string(), v.trim().to_string()));
    }
    out
}

/// Write via a `.part` sibling then rename, so a concurrent reader never
/// observes a half-written file.
fn write_atomic(path: &Path, entries: &[(String, String)]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut txt = String::from("# mirror ui prefs\n");
    for (k, v) in entries {
        txt.push_str(k);
        txt.push('=');
        txt.push_str(v);
        txt.push('\n');
    }
    let tmp = path.with_extension("txt.part");
    fs::write(&tmp, txt)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> PreferenceStore {
        PreferenceStore::with_path(dir.path().join("ui_prefs.txt"))
    }

    #[test]
    fn defaults_to_newest_first_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        assert_eq!(prefs.sort_mode(), SortMode::DateAddedNewest);
    }

    #[test]
    fn sort_mode_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        prefs.set_sort_mode(SortMode::RatingHighToLow);
        assert_eq!(prefs.sort_mode(), SortMode::RatingHighToLow);
        prefs.set_sort_mode(SortMode::Watched);
        assert_eq!(prefs.sort_mode(), SortMode::Watched);
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_prefs.txt");
        fs::write(&path, "sorting_method=BOGUS\n").unwrap();
        let prefs = PreferenceStore::with_path(path);
        assert_eq!(prefs.sort_mode(), SortMode::DateAddedNewest);
    }

    #[test]
    fn rewrite_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        prefs.set_poster_width(160.0);
        prefs.set_sort_mode(SortMode::Unwatched);
        assert_eq!(prefs.poster_width(), Some(160.0));
        assert_eq!(prefs.sort_mode(), SortMode::Unwatched);
    }

    #[test]
    fn no_partial_file_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        prefs.set_sort_mode(SortMode::Watched);
        assert!(!dir.path().join("ui_prefs.txt.part").exists());
    }
}
