//! Client takeover seam
//!
//! Activation and cache clearing claim control of open client pages. The
//! host environment decides what "claim" means; the CLI attaches a no-op
//! hub.

use crate::error::GencacheResult;
use async_trait::async_trait;
use tracing::debug;

/// Abstract handle to the set of open client pages
#[async_trait]
pub trait ClientHub: Send + Sync {
    /// Take control of all open clients immediately; returns how many
    async fn claim(&self) -> GencacheResult<usize>;
}

/// Client hub with no clients attached
pub struct NullClients;

#[async_trait]
impl ClientHub for NullClients {
    async fn claim(&self) -> GencacheResult<usize> {
        debug!("No client hub attached, nothing to claim");
        Ok(0)
    }
}
