//! Message transaction type
//!
//! The only transaction kind in this prototype: a signed-ish text message
//! between two named parties. Sender, acceptor, content and signature are
//! plain string placeholders.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::timestamp;

/// Sentinel for a party that has not been assigned yet
pub const PARTY_UNDEFINED: &str = "undefined";

/// A "message" transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxMessage {
    moment: DateTime<Utc>,
    sender: String,
    acceptor: String,
    content: String,
    signature: String,
}

impl TxMessage {
    /// Create an empty message stamped with the current UTC moment
    pub fn new() -> Self {
        Self {
            moment: timestamp::this_moment(),
            sender: PARTY_UNDEFINED.to_string(),
            acceptor: PARTY_UNDEFINED.to_string(),
            content: String::new(),
            signature: String::new(),
        }
    }

    /// UTC moment this transaction was created
    pub fn moment(&self) -> DateTime<Utc> {
        self.moment
    }

    /// Sending party
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Receiving party
    pub fn acceptor(&self) -> &str {
        &self.acceptor
    }

    /// Message content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Signature placeholder
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Set the sending party
    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.sender = sender.into();
    }

    /// Set the receiving party
    pub fn set_acceptor(&mut self, acceptor: impl Into<String>) {
        self.acceptor = acceptor.into();
    }

    /// Set the message content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Set the signature placeholder
    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.signature = signature.into();
    }

    /// Whether both parties have been assigned and the content is present
    pub fn fully_initialized(&self) -> bool {
        self.sender != PARTY_UNDEFINED
            && self.acceptor != PARTY_UNDEFINED
            && !self.content.is_empty()
    }

    /// Dictionary form of the transaction
    pub fn as_dict(&self) -> Value {
        json!({
            "moment": timestamp::moment_to_str(&self.moment),
            "sender": self.sender,
            "acceptor": self.acceptor,
            "content": self.content,
            "signature": self.signature,
        })
    }

    /// JSON string form of [`as_dict`](Self::as_dict)
    pub fn as_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.as_dict())
    }

    /// Size of the JSON form in bytes
    pub fn size_in_bytes(&self) -> serde_json::Result<usize> {
        Ok(self.as_json()?.len())
    }
}

impl Default for TxMessage {
    fn default() -> Self {
        Self::new()
    }
}
