//! Request/response value types shared by the store, transport and policy
//!
//! A `Response` is the unit stored in a cache generation and returned to the
//! caller: status code, optional content type, raw body bytes, and a kind
//! describing where it came from relative to the configured site origin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of the synthetic response returned when a local fetch fails
pub const OFFLINE_BODY: &str = "Offline - resource could not be loaded";

/// Where a response originated relative to the site origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin response
    Basic,
    /// Cross-origin response
    Cors,
    /// Cross-origin response with no readable metadata
    Opaque,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Cors => write!(f, "cors"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

/// A response as seen by the policy engine and the cache store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header, if the transport exposed one
    pub content_type: Option<String>,
    /// Raw body bytes
    pub body: Vec<u8>,
    /// Origin classification assigned by the transport
    pub kind: ResponseKind,
}

impl Response {
    /// Create a same-origin 200 response (convenience for tests and stores)
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.into()),
            body: body.into(),
            kind: ResponseKind::Basic,
        }
    }

    /// The synthetic 503 returned when a local-origin fetch fails entirely
    pub fn offline() -> Self {
        Self {
            status: 503,
            content_type: Some("text/plain".to_string()),
            body: OFFLINE_BODY.as_bytes().to_vec(),
            kind: ResponseKind::Basic,
        }
    }

    /// Whether this response may be written into a cache generation
    ///
    /// Only successful same-origin responses are cached; everything else is
    /// passed through to the caller uncached.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_response_shape() {
        let resp = Response::offline();
        assert_eq!(resp.status, 503);
        assert_eq!(resp.content_type.as_deref(), Some("text/plain"));
        assert_eq!(resp.body, OFFLINE_BODY.as_bytes());
    }

    #[test]
    fn cacheable_requires_200_basic() {
        assert!(Response::ok("text/html", "<html>").is_cacheable());

        let not_found = Response {
            status: 404,
            ..Response::ok("text/html", "")
        };
        assert!(!not_found.is_cacheable());

        let cross_origin = Response {
            kind: ResponseKind::Cors,
            ..Response::ok("text/javascript", "x")
        };
        assert!(!cross_origin.is_cacheable());
    }

    #[test]
    fn offline_is_not_cacheable() {
        assert!(!Response::offline().is_cacheable());
    }
}
