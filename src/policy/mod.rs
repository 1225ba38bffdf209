//! Request policy: origin classification and retrieval strategy
//!
//! Local requests are cache-first; external requests (matched by an
//! allowlist of URL prefixes) are network-first and never cached on
//! success. Every local request terminates in a response, degrading to a
//! synthetic 503 when the network is unreachable.

pub mod classifier;
pub mod engine;

pub use classifier::{Origin, OriginClassifier};
pub use engine::PolicyEngine;
