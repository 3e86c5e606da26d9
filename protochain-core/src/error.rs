//! Error types for the core crate

use protochain_version::VersionError;
use thiserror::Error;

/// Core entity errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("version codec error: {0}")]
    Version(#[from] VersionError),

    #[error("invalid height {0} (expected a positive block height)")]
    InvalidHeight(u64),

    #[error("invalid difficulty {0} (expected at least {min})", min = crate::block::MINIMAL_DIFFICULTY)]
    InvalidDifficulty(u32),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
