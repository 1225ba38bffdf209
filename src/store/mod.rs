//! Generation-scoped cache store
//!
//! A store holds named cache generations; each generation maps a request
//! identity (its URL) to a stored response. Exactly one generation is
//! current at a time; lifecycle activation deletes every other name.
//!
//! Writes are last-write-wins per key. There is no eviction beyond deleting
//! a whole generation.

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use crate::error::GencacheResult;
use crate::http::Response;
use async_trait::async_trait;

/// Abstract cache store interface
///
/// Implemented by the on-disk backend used by the CLI and an in-memory
/// backend used by tests and embedders.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a generation by name, creating it if absent
    async fn open(&self, name: &str) -> GencacheResult<()>;

    /// Enumerate all generation names
    async fn names(&self) -> GencacheResult<Vec<String>>;

    /// Delete a generation by name; returns whether it existed
    async fn delete(&self, name: &str) -> GencacheResult<bool>;

    /// Look up a cached response by request identity
    async fn get(&self, name: &str, url: &str) -> GencacheResult<Option<Response>>;

    /// Store a response copy under a request identity (last-write-wins)
    async fn put(&self, name: &str, url: &str, response: &Response) -> GencacheResult<()>;

    /// Enumerate the request identities stored in a generation
    async fn entries(&self, name: &str) -> GencacheResult<Vec<String>>;
}
