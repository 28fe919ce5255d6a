use thiserror::Error;

use super::snapshot_store::SnapshotKind;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("image too large: {size} bytes exceeds limit of {limit} bytes")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("image encoding failed: {0}")]
    EncodingFailed(String),

    #[error("thumbnail generation failed: {0}")]
    ThumbnailFailed(String),

    #[error("invalid image filename: {0}")]
    InvalidFilename(String),

    #[error("image store io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {kind} snapshot: {message}")]
    ReadFailed { kind: SnapshotKind, message: String },

    #[error("{kind} snapshot is corrupt: {message}")]
    Corrupt { kind: SnapshotKind, message: String },

    #[error("failed to write {kind} snapshot: {message}")]
    WriteFailed { kind: SnapshotKind, message: String },
}

impl PersistenceError {
    pub fn kind(&self) -> SnapshotKind {
        match self {
            PersistenceError::ReadFailed { kind, .. }
            | PersistenceError::Corrupt { kind, .. }
            | PersistenceError::WriteFailed { kind, .. } => *kind,
        }
    }
}
