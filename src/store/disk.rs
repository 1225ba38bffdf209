//! On-disk cache store backend
//!
//! Layout: one directory per generation under the store root. Each entry is
//! a pair of files named by the hex SHA256 of the request URL:
//! `<key>.json` holds the metadata, `<key>.body` holds the raw bytes. The
//! body is written before the metadata so a concurrent reader never observes
//! metadata without its body.

use crate::error::{GencacheError, GencacheResult};
use crate::http::{Response, ResponseKind};
use crate::store::CacheStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Metadata sidecar stored next to each entry body
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    /// Request identity this entry was stored under
    url: String,
    /// HTTP status of the stored response
    status: u16,
    /// Content-Type, if the response carried one
    content_type: Option<String>,
    /// Origin classification of the stored response
    kind: ResponseKind,
    /// When the entry was written
    stored_at: DateTime<Utc>,
}

/// Cache store backed by a directory tree
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn generation_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Content key for a request identity
    fn entry_key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn meta_path(&self, name: &str, url: &str) -> PathBuf {
        self.generation_dir(name)
            .join(format!("{}.json", Self::entry_key(url)))
    }

    fn body_path(&self, name: &str, url: &str) -> PathBuf {
        self.generation_dir(name)
            .join(format!("{}.body", Self::entry_key(url)))
    }
}

async fn read_meta(path: &Path, url: &str) -> GencacheResult<EntryMeta> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| GencacheError::store(format!("reading metadata for {}", url), e))?;
    serde_json::from_str(&raw).map_err(|e| GencacheError::EntryCorrupt {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn open(&self, name: &str) -> GencacheResult<()> {
        let dir = self.generation_dir(name);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| GencacheError::GenerationOpen {
                name: name.to_string(),
                source: e,
            })?;
        debug!("Opened cache generation {}", name);
        Ok(())
    }

    async fn names(&self) -> GencacheResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|e| GencacheError::store("listing cache generations", e))?;

        let mut names = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| GencacheError::store("listing cache generations", e))?
        {
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| GencacheError::store("inspecting cache generation", e))?
                .is_dir();
            if is_dir {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> GencacheResult<bool> {
        let dir = self.generation_dir(name);
        if !dir.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&dir)
            .await
            .map_err(|e| GencacheError::store(format!("deleting generation {}", name), e))?;
        debug!("Deleted cache generation {}", name);
        Ok(true)
    }

    async fn get(&self, name: &str, url: &str) -> GencacheResult<Option<Response>> {
        let meta_path = self.meta_path(name, url);
        if !meta_path.exists() {
            return Ok(None);
        }

        let meta = read_meta(&meta_path, url).await?;
        let body = fs::read(self.body_path(name, url))
            .await
            .map_err(|e| GencacheError::store(format!("reading body for {}", url), e))?;

        Ok(Some(Response {
            status: meta.status,
            content_type: meta.content_type,
            body,
            kind: meta.kind,
        }))
    }

    async fn put(&self, name: &str, url: &str, response: &Response) -> GencacheResult<()> {
        self.open(name).await?;

        let meta = EntryMeta {
            url: url.to_string(),
            status: response.status,
            content_type: response.content_type.clone(),
            kind: response.kind,
            stored_at: Utc::now(),
        };

        // Body first: readers treat the metadata file as the commit point.
        fs::write(self.body_path(name, url), &response.body)
            .await
            .map_err(|e| GencacheError::store(format!("writing body for {}", url), e))?;
        fs::write(self.meta_path(name, url), serde_json::to_vec(&meta)?)
            .await
            .map_err(|e| GencacheError::store(format!("writing metadata for {}", url), e))?;

        debug!("Cached {} in generation {}", url, name);
        Ok(())
    }

    async fn entries(&self, name: &str) -> GencacheResult<Vec<String>> {
        let dir = self.generation_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut read = fs::read_dir(&dir)
            .await
            .map_err(|e| GencacheError::store(format!("listing generation {}", name), e))?;

        let mut urls = Vec::new();
        while let Some(entry) = read
            .next_entry()
            .await
            .map_err(|e| GencacheError::store(format!("listing generation {}", name), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let meta = read_meta(&path, "<unknown>").await?;
            urls.push(meta.url);
        }

        urls.sort();
        Ok(urls)
    }
}
