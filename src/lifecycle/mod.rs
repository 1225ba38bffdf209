//! Deployment lifecycle for cache generations
//!
//! One controller instance manages one deployment generation through
//! `uninstalled → installing → waiting → active → superseded`. Installation
//! and activation are an explicit two-phase protocol: `prepare()` populates
//! the generation and returns a completion signal that `commit()` consumes
//! before garbage-collecting old generations and claiming clients.

pub mod clients;
pub mod controller;
pub mod message;

pub use clients::{ClientHub, NullClients};
pub use controller::{ActivateReport, InstallReport, LifecycleController, LifecycleState};
pub use message::Message;

/// Background sync tag recognized by the (stubbed) sync handler
pub const SYNC_DATA_TAG: &str = "sync-data";
