//! Message channel payloads
//!
//! The hosting page sends structured JSON messages. Only two shapes are
//! recognized; anything else is silently ignored by the controller.

use serde::Deserialize;
use serde_json::Value;

/// A recognized control message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Advance a waiting generation to active immediately
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,

    /// Delete every cache generation unconditionally
    #[serde(rename = "CLEAR_CACHE")]
    ClearCache,
}

impl Message {
    /// Parse a raw payload; `None` means "not for us", never an error
    pub fn parse(payload: &Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}
