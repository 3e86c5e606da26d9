//! Error types for the version codec

use thiserror::Error;

/// Version codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("value {0} does not fit into an unsigned byte")]
    NotAByte(u16),

    #[error("invalid bit string {0:?} (expected up to 8 binary digits)")]
    InvalidBitString(String),

    #[error("incorrect byte buffer length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("incorrect major value {value} (expected {min}..={max})")]
    InvalidMajor { value: u8, min: u8, max: u8 },

    #[error("incorrect minor value {value} (expected {min}..={max})")]
    InvalidMinor { value: u8, min: u8, max: u8 },

    #[error("incorrect patch value {value} (expected {min}..={max})")]
    InvalidPatch { value: u8, min: u8, max: u8 },

    #[error("the registered change listener is no longer alive")]
    DeadListener,
}

/// Result type for version codec operations
pub type VersionResult<T> = Result<T, VersionError>;
