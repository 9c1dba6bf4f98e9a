// src/app/types.rs
use crate::app::data::PerformerProfile;

// ---- UI views ----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Films,
    Actresses,
    Import,
    Dashboard,
}

impl View {
    pub const ALL: [Self; 4] = [Self::Films, Self::Actresses, Self::Import, Self::Dashboard];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Films => "Films",
            Self::Actresses => "Actresses",
            Self::Import => "Import",
            Self::Dashboard => "Dashboard",
        }
    }
}

// ---- sort modes (persisted identifiers, see PreferenceStore) ----

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    DateAddedNewest,
    DateAddedOldest,
    Unwatched,
    Watched,
    RatingHighToLow,
    RatingLowToHigh,
}

impl SortMode {
    pub const ALL: [Self; 6] = [
        Self::DateAddedNewest,
        Self::DateAddedOldest,
        Self::Unwatched,
        Self::Watched,
        Self::RatingHighToLow,
        Self::RatingLowToHigh,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateAddedNewest => "DANF",
            Self::DateAddedOldest => "DAOF",
            Self::Unwatched => "UW",
            Self::Watched => "W",
            Self::RatingHighToLow => "RHTL",
            Self::RatingLowToHigh => "RLTH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "DANF" => Some(Self::DateAddedNewest),
            "DAOF" => Some(Self::DateAddedOldest),
            "UW" => Some(Self::Unwatched),
            "W" => Some(Self::Watched),
            "RHTL" => Some(Self::RatingHighToLow),
            "RLTH" => Some(Self::RatingLowToHigh),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DateAddedNewest => "Date Added (Newest First)",
            Self::DateAddedOldest => "Date Added (Oldest First)",
            Self::Unwatched => "Unwatched",
            Self::Watched => "Watched",
            Self::RatingHighToLow => "Rating (High to Low)",
            Self::RatingLowToHigh => "Rating (Low to High)",
        }
    }
}

// ---- cross-thread messages / data ----

/// RGBA pixels decoded off the UI thread, uploaded as a texture on it.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct ThumbDone {
    pub uuid: String,
    pub result: Result<DecodedImage, String>,
}

/// Resolution of one actress name against the performer directory.
#[derive(Clone)]
pub enum ResolveState {
    Idle,
    Searching,
    Resolving,
    SettlingImage,
    Found(Box<ResolvedActress>),
    NotFound,
}

#[derive(Clone)]
pub struct ResolvedActress {
    pub profile: PerformerProfile,
    pub portrait: Option<DecodedImage>,
    pub aggregate_rating: f32,
}

pub struct ResolveMsg {
    pub generation: u64,
    pub state: ResolveState,
}
