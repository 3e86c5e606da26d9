//! Core blockchain entities
//!
//! Thin data holders built around the version codec:
//! - Basic types (Hash, BlockNumber)
//! - Block header, block body and the message transaction type
//! - UTC timestamp helpers
//!
//! Consensus, networking, persistence and mining are all out of scope;
//! nonce and difficulty exist as inert placeholders and the merkle root
//! is a stub.

pub mod block;
pub mod error;
pub mod timestamp;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use block::*;
pub use error::*;
pub use timestamp::*;
pub use transaction::*;
pub use types::*;
