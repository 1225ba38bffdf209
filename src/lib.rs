//! gencache - generation-scoped caching proxy engine
//!
//! Serves app-shell requests cache-first and external requests
//! network-first, and manages the cache generation lifecycle across
//! deployments (install, activate, clear).

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod policy;
pub mod store;

pub use error::{GencacheError, GencacheResult};
