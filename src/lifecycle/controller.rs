//! Lifecycle controller state machine
//!
//! `prepare()` (install) pre-populates the generation from the asset
//! manifest; fetch failures are logged and recorded but never abort the
//! install, so a partially populated generation can become current.
//! `commit()` (activate) deletes every other generation and claims clients.

use crate::error::{GencacheError, GencacheResult};
use crate::lifecycle::{ClientHub, Message, SYNC_DATA_TAG};
use crate::net::Transport;
use crate::store::CacheStore;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle phase of one deployment generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Controller constructed, nothing installed yet
    Uninstalled,
    /// Manifest population in progress
    Installing,
    /// Installed, ready for immediate handover
    Waiting,
    /// This generation serves requests
    Active,
    /// A newer generation has taken over
    Superseded,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninstalled => write!(f, "uninstalled"),
            Self::Installing => write!(f, "installing"),
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Superseded => write!(f, "superseded"),
        }
    }
}

/// Completion signal returned by `prepare`, consumed by `commit`
#[derive(Debug)]
pub struct InstallReport {
    /// Generation that was populated
    pub generation: String,
    /// Number of manifest entries cached
    pub cached: usize,
    /// Manifest URLs that could not be fetched or stored
    pub failed: Vec<String>,
}

/// Result of `commit`
#[derive(Debug)]
pub struct ActivateReport {
    /// Old generation names that were deleted
    pub removed: Vec<String>,
    /// How many clients were claimed
    pub claimed: usize,
}

/// Drives one generation through install, activation and takedown
pub struct LifecycleController {
    store: Arc<dyn CacheStore>,
    transport: Arc<dyn Transport>,
    clients: Arc<dyn ClientHub>,
    generation: String,
    manifest: Vec<String>,
    state: LifecycleState,
}

impl LifecycleController {
    /// Create a controller for the given generation and asset manifest
    pub fn new(
        store: Arc<dyn CacheStore>,
        transport: Arc<dyn Transport>,
        clients: Arc<dyn ClientHub>,
        generation: impl Into<String>,
        manifest: Vec<String>,
    ) -> Self {
        Self {
            store,
            transport,
            clients,
            generation: generation.into(),
            manifest,
            state: LifecycleState::Uninstalled,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Name of the generation this controller manages
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Install: open the generation and pre-populate the asset manifest
    ///
    /// Per-asset failures are logged and listed in the report; the install
    /// itself never aborts on them and there are no retries. Ends in
    /// `Waiting` with immediate handover requested, so the standard
    /// multi-client delay is skipped.
    pub async fn prepare(&mut self) -> GencacheResult<InstallReport> {
        self.state = LifecycleState::Installing;
        info!("Installing generation {}", self.generation);

        self.store.open(&self.generation).await?;

        let mut cached = 0;
        let mut failed = Vec::new();
        for url in &self.manifest {
            match self.transport.fetch(url).await {
                Ok(response) => match self.store.put(&self.generation, url, &response).await {
                    Ok(()) => cached += 1,
                    Err(e) => {
                        warn!("Failed to store manifest entry {}: {}", url, e);
                        failed.push(url.clone());
                    }
                },
                Err(e) => {
                    warn!("Failed to fetch manifest entry {}: {}", url, e);
                    failed.push(url.clone());
                }
            }
        }

        self.state = LifecycleState::Waiting;
        info!(
            "Installed generation {} ({} cached, {} failed)",
            self.generation,
            cached,
            failed.len()
        );

        Ok(InstallReport {
            generation: self.generation.clone(),
            cached,
            failed,
        })
    }

    /// Activate: delete every other generation and claim all clients
    ///
    /// Consumes the completion signal from `prepare`, making the
    /// install-before-activate ordering explicit.
    pub async fn commit(&mut self, report: InstallReport) -> GencacheResult<ActivateReport> {
        if report.generation != self.generation {
            return Err(GencacheError::Internal(format!(
                "install report is for generation {}, controller manages {}",
                report.generation, self.generation
            )));
        }

        let mut removed = Vec::new();
        for name in self.store.names().await? {
            if name != self.generation {
                info!("Removing old generation {}", name);
                self.store.delete(&name).await?;
                removed.push(name);
            }
        }

        let claimed = self.clients.claim().await?;
        self.state = LifecycleState::Active;
        info!(
            "Activated generation {} ({} old removed, {} clients claimed)",
            self.generation,
            removed.len(),
            claimed
        );

        Ok(ActivateReport { removed, claimed })
    }

    /// Handle a message from the hosting page; unknown payloads are ignored
    pub async fn handle_message(&mut self, payload: &Value) -> GencacheResult<()> {
        match Message::parse(payload) {
            Some(Message::SkipWaiting) => {
                if self.state == LifecycleState::Waiting {
                    self.state = LifecycleState::Active;
                    info!("Generation {} advanced to active", self.generation);
                } else {
                    debug!("SKIP_WAITING ignored in state {}", self.state);
                }
                Ok(())
            }
            Some(Message::ClearCache) => self.clear_all().await,
            None => {
                debug!("Ignoring unrecognized message: {}", payload);
                Ok(())
            }
        }
    }

    /// Delete every cache generation unconditionally, then claim clients
    async fn clear_all(&self) -> GencacheResult<()> {
        for name in self.store.names().await? {
            self.store.delete(&name).await?;
        }
        let claimed = self.clients.claim().await?;
        info!("All cache generations cleared ({} clients claimed)", claimed);
        Ok(())
    }

    /// Handle a background sync tag
    ///
    /// The `sync-data` handler is a stub; it performs no synchronization.
    pub fn handle_sync(&self, tag: &str) {
        if tag == SYNC_DATA_TAG {
            debug!("Background sync requested, not implemented");
        } else {
            debug!("Ignoring sync tag {}", tag);
        }
    }

    /// Mark this generation superseded by a newer deployment
    pub fn supersede(&mut self) {
        if self.state == LifecycleState::Active {
            self.state = LifecycleState::Superseded;
            info!("Generation {} superseded", self.generation);
        } else {
            debug!("Supersede ignored in state {}", self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockTransport {
        responses: HashMap<String, Response>,
    }

    impl MockTransport {
        fn serving(urls: &[&str]) -> Self {
            Self {
                responses: urls
                    .iter()
                    .map(|url| (url.to_string(), Response::ok("text/html", *url)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn fetch(&self, url: &str) -> GencacheResult<Response> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| GencacheError::fetch(url, "connection refused"))
        }
    }

    #[derive(Default)]
    struct CountingClients {
        claims: AtomicUsize,
    }

    #[async_trait]
    impl ClientHub for CountingClients {
        async fn claim(&self) -> GencacheResult<usize> {
            self.claims.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        }
    }

    const GEN: &str = "app-shell-v1.0.0";

    fn manifest() -> Vec<String> {
        ["/", "/index.html", "/manifest.json"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn controller(
        store: Arc<MemoryStore>,
        transport: MockTransport,
        clients: Arc<CountingClients>,
    ) -> LifecycleController {
        LifecycleController::new(store, Arc::new(transport), clients, GEN, manifest())
    }

    #[tokio::test]
    async fn prepare_populates_every_manifest_entry() {
        let store = Arc::new(MemoryStore::new());
        let mut ctl = controller(
            Arc::clone(&store),
            MockTransport::serving(&["/", "/index.html", "/manifest.json"]),
            Arc::new(CountingClients::default()),
        );
        assert_eq!(ctl.state(), LifecycleState::Uninstalled);

        let report = ctl.prepare().await.unwrap();
        assert_eq!(report.cached, 3);
        assert!(report.failed.is_empty());
        assert_eq!(ctl.state(), LifecycleState::Waiting);

        assert_eq!(
            store.entries(GEN).await.unwrap(),
            vec!["/", "/index.html", "/manifest.json"]
        );
    }

    #[tokio::test]
    async fn prepare_continues_past_fetch_failures() {
        let store = Arc::new(MemoryStore::new());
        // "/manifest.json" is unreachable.
        let mut ctl = controller(
            Arc::clone(&store),
            MockTransport::serving(&["/", "/index.html"]),
            Arc::new(CountingClients::default()),
        );

        let report = ctl.prepare().await.unwrap();
        assert_eq!(report.cached, 2);
        assert_eq!(report.failed, vec!["/manifest.json"]);
        assert_eq!(ctl.state(), LifecycleState::Waiting);
    }

    #[tokio::test]
    async fn commit_retains_only_the_current_generation() {
        let store = Arc::new(MemoryStore::new());
        store.open("app-shell-v0.9.0").await.unwrap();
        store.open("app-shell-v0.9.5").await.unwrap();

        let clients = Arc::new(CountingClients::default());
        let mut ctl = controller(
            Arc::clone(&store),
            MockTransport::serving(&["/", "/index.html", "/manifest.json"]),
            Arc::clone(&clients),
        );

        let report = ctl.prepare().await.unwrap();
        let activation = ctl.commit(report).await.unwrap();

        assert_eq!(
            activation.removed,
            vec!["app-shell-v0.9.0", "app-shell-v0.9.5"]
        );
        assert_eq!(activation.claimed, 2);
        assert_eq!(store.names().await.unwrap(), vec![GEN]);
        assert_eq!(ctl.state(), LifecycleState::Active);
        assert_eq!(clients.claims.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn commit_rejects_a_foreign_report() {
        let store = Arc::new(MemoryStore::new());
        let mut ctl = controller(
            store,
            MockTransport::serving(&[]),
            Arc::new(CountingClients::default()),
        );

        let foreign = InstallReport {
            generation: "other-app-v2".to_string(),
            cached: 0,
            failed: Vec::new(),
        };
        assert!(ctl.commit(foreign).await.is_err());
        assert_ne!(ctl.state(), LifecycleState::Active);
    }

    #[tokio::test]
    async fn skip_waiting_advances_a_waiting_generation() {
        let store = Arc::new(MemoryStore::new());
        let mut ctl = controller(
            store,
            MockTransport::serving(&["/", "/index.html", "/manifest.json"]),
            Arc::new(CountingClients::default()),
        );

        ctl.prepare().await.unwrap();
        ctl.handle_message(&json!({"type": "SKIP_WAITING"}))
            .await
            .unwrap();
        assert_eq!(ctl.state(), LifecycleState::Active);
    }

    #[tokio::test]
    async fn skip_waiting_is_ignored_outside_waiting() {
        let store = Arc::new(MemoryStore::new());
        let mut ctl = controller(
            store,
            MockTransport::serving(&[]),
            Arc::new(CountingClients::default()),
        );

        ctl.handle_message(&json!({"type": "SKIP_WAITING"}))
            .await
            .unwrap();
        assert_eq!(ctl.state(), LifecycleState::Uninstalled);
    }

    #[tokio::test]
    async fn clear_cache_deletes_every_generation() {
        let store = Arc::new(MemoryStore::new());
        store.open("app-shell-v0.9.0").await.unwrap();
        store.open(GEN).await.unwrap();

        let clients = Arc::new(CountingClients::default());
        let mut ctl = controller(
            Arc::clone(&store),
            MockTransport::serving(&[]),
            Arc::clone(&clients),
        );

        ctl.handle_message(&json!({"type": "CLEAR_CACHE"}))
            .await
            .unwrap();

        assert!(store.names().await.unwrap().is_empty());
        assert_eq!(clients.claims.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_messages_are_silently_ignored() {
        let store = Arc::new(MemoryStore::new());
        store.open(GEN).await.unwrap();

        let mut ctl = controller(
            Arc::clone(&store),
            MockTransport::serving(&[]),
            Arc::new(CountingClients::default()),
        );

        ctl.handle_message(&json!({"type": "PING"})).await.unwrap();
        ctl.handle_message(&json!("just a string")).await.unwrap();

        assert_eq!(ctl.state(), LifecycleState::Uninstalled);
        assert_eq!(store.names().await.unwrap(), vec![GEN]);
    }

    #[tokio::test]
    async fn sync_handler_is_a_stub() {
        let ctl = controller(
            Arc::new(MemoryStore::new()),
            MockTransport::serving(&[]),
            Arc::new(CountingClients::default()),
        );

        // Neither tag does anything observable.
        ctl.handle_sync(SYNC_DATA_TAG);
        ctl.handle_sync("some-other-tag");
        assert_eq!(ctl.state(), LifecycleState::Uninstalled);
    }

    #[tokio::test]
    async fn supersede_only_applies_to_active() {
        let store = Arc::new(MemoryStore::new());
        let mut ctl = controller(
            store,
            MockTransport::serving(&["/", "/index.html", "/manifest.json"]),
            Arc::new(CountingClients::default()),
        );

        ctl.supersede();
        assert_eq!(ctl.state(), LifecycleState::Uninstalled);

        let report = ctl.prepare().await.unwrap();
        ctl.commit(report).await.unwrap();
        ctl.supersede();
        assert_eq!(ctl.state(), LifecycleState::Superseded);
    }
}
