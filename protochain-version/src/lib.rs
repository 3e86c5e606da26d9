//! Bit-packed protocol version encoding
//!
//! This crate provides the version codec used by block headers:
//! - A full (absolute) version packed into 2 bytes: `[major:8][minor:4][patch:4]`
//! - A short version *offset* packed into 1 byte: `[major:2][minor:3][patch:3]`
//! - A composite version that observes a bound full/short pair and keeps
//!   the effective field-wise sum up to date
//! - Low-level bit-field helpers

pub mod bits;
pub mod composite;
pub mod error;
pub mod full;
pub mod observer;
pub mod short;

// Re-export commonly used types
pub use composite::*;
pub use error::*;
pub use full::*;
pub use observer::*;
pub use short::*;

/// Effective (major, minor, patch) triple derived by a composite version.
///
/// Semantic values, not bit-packed ones: a sum may exceed the packed field
/// widths, and `-1` marks a field as undefined.
pub type VersionTriple = (i32, i32, i32);

/// Sentinel triple used while a composite version is not fully bound.
pub const UNDEFINED_TRIPLE: VersionTriple = (-1, -1, -1);
