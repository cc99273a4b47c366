use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("roster is not ready: {0}")]
    NotReady(String),

    #[error("failed to load roster data from {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    #[error("duplicate member id: {0}")]
    DuplicateId(String),

    #[error("member not found: {0}")]
    UnknownRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RosterError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        RosterError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
