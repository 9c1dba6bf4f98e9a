// src/app/data.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---- backend-owned records (replace-on-refresh copies, never mutated locally) ----

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilmState {
    Queued,
    Downloading,
    Complete,
    Error,
}

/// `average == 0` is the "unrated" sentinel, not a real score.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Film {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub actresses: Vec<String>,
    pub state: FilmState,
    /// 0–100, meaningful only while `state == Downloading`.
    #[serde(default)]
    pub download_progress: u8,
    /// Meaningful only when `state == Complete`.
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub rating: Rating,
    pub date_added: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ImportCandidate {
    pub hash: String,
    pub title: String,
    #[serde(default)]
    pub imported: bool,
    #[serde(default)]
    pub ignored: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DatabaseDiagnostics {
    /// MB.
    #[serde(default)]
    pub size: f64,
    /// Seconds.
    #[serde(default)]
    pub query_time: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DiskDiagnostics {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub free: f64,
}

/// Aggregate counters, replaced wholesale every poll (never merged per field).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DiagnosticSnapshot {
    /// Bytes.
    #[serde(default)]
    pub cache_size: f64,
    #[serde(default)]
    pub database: DatabaseDiagnostics,
    #[serde(default)]
    pub disk: DiskDiagnostics,
}

// ---- external performer directory ----

#[derive(Clone, Debug, Deserialize)]
pub struct PerformerHit {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PerformerExtras {
    pub birthday: Option<String>,
    pub ethnicity: Option<String>,
    pub nationality: Option<String>,
    pub height: Option<String>,
    pub hair_colour: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PerformerProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub face: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub extras: PerformerExtras,
}

/// The directory wraps every payload in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}
