//! CLI command implementations

pub mod clear;
pub mod config;
pub mod deploy;
pub mod fetch;
pub mod status;

pub use clear::execute as clear;
pub use config::execute as config;
pub use deploy::execute as deploy;
pub use fetch::execute as fetch;
pub use status::execute as status;

use crate::config::{Config, ConfigManager};
use crate::lifecycle::{LifecycleController, NullClients};
use crate::net::HttpTransport;
use crate::policy::OriginClassifier;
use crate::store::DiskStore;
use std::sync::Arc;

/// Build the on-disk store rooted per the configuration
pub(crate) fn build_store(config: &Config) -> Arc<DiskStore> {
    Arc::new(DiskStore::new(ConfigManager::cache_root(config)))
}

/// Build the HTTP transport for the configured site origin
pub(crate) fn build_transport(config: &Config) -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new(config.network.site_origin.clone()))
}

/// Build the origin classifier from the external-origin allowlist
pub(crate) fn build_classifier(config: &Config) -> OriginClassifier {
    OriginClassifier::new(config.network.external_origins.clone())
}

/// Build a lifecycle controller for the current generation
pub(crate) fn build_controller(config: &Config) -> LifecycleController {
    LifecycleController::new(
        build_store(config),
        build_transport(config),
        Arc::new(NullClients),
        config.generation_name(),
        config.manifest.assets.clone(),
    )
}
