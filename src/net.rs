//! Network transport
//!
//! Abstracts the outbound fetch so the policy engine and lifecycle
//! controller can be driven by a mock in tests. The real backend wraps a
//! blocking `ureq` agent in `spawn_blocking`.
//!
//! HTTP error statuses (4xx/5xx) come back as ordinary responses so the
//! caller can inspect them; only connection-level failures are errors. No
//! request timeout is configured here; the client default applies.

use crate::error::{GencacheError, GencacheResult};
use crate::http::{Response, ResponseKind};
use async_trait::async_trait;
use tracing::debug;

/// Abstract network fetch interface
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a URL; relative URLs resolve against the site origin
    async fn fetch(&self, url: &str) -> GencacheResult<Response>;
}

/// Transport backed by a blocking HTTP client
pub struct HttpTransport {
    site_origin: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport resolving relative URLs against `site_origin`
    pub fn new(site_origin: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            site_origin: site_origin.into(),
            agent,
        }
    }

    /// Resolve a possibly-relative URL against the site origin
    fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.site_origin.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }

    /// Origin classification of a resolved URL
    fn kind_for(&self, resolved: &str) -> ResponseKind {
        if resolved.starts_with(self.site_origin.trim_end_matches('/')) {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> GencacheResult<Response> {
        let resolved = self.resolve(url);
        let kind = self.kind_for(&resolved);
        debug!("Fetching {}", resolved);

        let agent = self.agent.clone();
        let target = resolved.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut response = agent.get(&target).call()?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = response.body_mut().read_to_vec()?;
            Ok::<_, ureq::Error>((status, content_type, body))
        })
        .await
        .map_err(|e| GencacheError::Internal(format!("fetch task panicked: {}", e)))?;

        let (status, content_type, body) =
            result.map_err(|e| GencacheError::fetch(&resolved, e.to_string()))?;

        Ok(Response {
            status,
            content_type,
            body,
            kind,
        })
    }
}
