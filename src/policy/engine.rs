//! Retrieval strategy per intercepted request
//!
//! Cache-first for local origins, network-first for external origins.
//! Cache population after a local miss is fire-and-forget: concurrent
//! misses for the same key may both fetch and both write, last write wins.

use crate::error::GencacheResult;
use crate::http::Response;
use crate::net::Transport;
use crate::policy::{Origin, OriginClassifier};
use crate::store::CacheStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides and executes the retrieval strategy for each request
pub struct PolicyEngine {
    store: Arc<dyn CacheStore>,
    transport: Arc<dyn Transport>,
    classifier: OriginClassifier,
    generation: String,
}

impl PolicyEngine {
    /// Create an engine serving from the named generation
    pub fn new(
        store: Arc<dyn CacheStore>,
        transport: Arc<dyn Transport>,
        classifier: OriginClassifier,
        generation: impl Into<String>,
    ) -> Self {
        Self {
            store,
            transport,
            classifier,
            generation: generation.into(),
        }
    }

    /// Handle one intercepted request
    ///
    /// Local origins always resolve to a response, degrading to a synthetic
    /// 503 on network failure. The only error path is an external origin
    /// with both the network down and no cached fallback; that failure
    /// passes through to the caller.
    pub async fn handle(&self, url: &str) -> GencacheResult<Response> {
        match self.classifier.classify(url) {
            Origin::External => self.network_first(url).await,
            Origin::Local => Ok(self.cache_first(url).await),
        }
    }

    /// Network-first: live response preferred, cache as fallback, no writes
    async fn network_first(&self, url: &str) -> GencacheResult<Response> {
        let fetch_err = match self.transport.fetch(url).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        debug!("Network failed for external {}: {}", url, fetch_err);
        match self.store.get(&self.generation, url).await {
            Ok(Some(cached)) => {
                debug!("Serving external {} from cache fallback", url);
                Ok(cached)
            }
            Ok(None) => Err(fetch_err),
            Err(store_err) => {
                warn!("Cache fallback lookup failed for {}: {}", url, store_err);
                Err(fetch_err)
            }
        }
    }

    /// Cache-first: hit returned unconditionally, miss fetched and populated
    async fn cache_first(&self, url: &str) -> Response {
        match self.store.get(&self.generation, url).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for {}", url);
                return cached;
            }
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}, treating as miss: {}", url, e),
        }

        match self.transport.fetch(url).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.populate(url, response.clone());
                }
                response
            }
            Err(e) => {
                warn!("Fetch failed for local {}: {}", url, e);
                Response::offline()
            }
        }
    }

    /// Write a response copy into the current generation without blocking
    /// the response path; failures are logged, never surfaced.
    fn populate(&self, url: &str, response: Response) {
        let store = Arc::clone(&self.store);
        let generation = self.generation.clone();
        let url = url.to_string();

        tokio::spawn(async move {
            if let Err(e) = store.put(&generation, &url, &response).await {
                warn!("Failed to cache {} in {}: {}", url, generation, e);
            }
        });
    }
}
