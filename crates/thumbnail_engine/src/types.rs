use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use thumbnail_core::{FailureRecord, FetchTier, ProgressState};

/// A thumbnail body together with the tier it was served for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub tier: FetchTier,
    pub bytes: Bytes,
}

/// Result of resolving one item. A missing image is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(FetchedImage),
    NotFound,
}

impl FetchOutcome {
    pub fn tier(&self) -> Option<FetchTier> {
        match self {
            FetchOutcome::Found(image) => Some(image.tier),
            FetchOutcome::NotFound => None,
        }
    }
}

/// Finished archive plus the sorted failure records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveResult {
    pub archive_bytes: Vec<u8>,
    pub packaged: usize,
    pub failures: Vec<FailureRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub packaged: usize,
    pub byte_len: u64,
    pub failures: Vec<FailureRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArchive {
    pub archive_path: PathBuf,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(ProgressState),
    BuildCompleted(Result<BuildSummary, String>),
    SaveCompleted(Result<SavedArchive, String>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchFailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailureKind::InvalidUrl => write!(f, "invalid url"),
            FetchFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailureKind::Timeout => write!(f, "timeout"),
            FetchFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FetchFailureKind::Network => write!(f, "network error"),
        }
    }
}
