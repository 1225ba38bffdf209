//! In-memory cache store backend
//!
//! Used by unit tests and by embedders that do not want persistence. The
//! mutex is never held across an await point.

use crate::error::GencacheResult;
use crate::http::Response;
use crate::store::CacheStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cache store backed by nested hash maps
#[derive(Default)]
pub struct MemoryStore {
    generations: Mutex<HashMap<String, HashMap<String, Response>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, name: &str) -> GencacheResult<()> {
        self.generations
            .lock()
            .expect("store mutex poisoned")
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn names(&self) -> GencacheResult<Vec<String>> {
        let mut names: Vec<String> = self
            .generations
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> GencacheResult<bool> {
        Ok(self
            .generations
            .lock()
            .expect("store mutex poisoned")
            .remove(name)
            .is_some())
    }

    async fn get(&self, name: &str, url: &str) -> GencacheResult<Option<Response>> {
        Ok(self
            .generations
            .lock()
            .expect("store mutex poisoned")
            .get(name)
            .and_then(|entries| entries.get(url))
            .cloned())
    }

    async fn put(&self, name: &str, url: &str, response: &Response) -> GencacheResult<()> {
        self.generations
            .lock()
            .expect("store mutex poisoned")
            .entry(name.to_string())
            .or_default()
            .insert(url.to_string(), response.clone());
        Ok(())
    }

    async fn entries(&self, name: &str) -> GencacheResult<Vec<String>> {
        let mut urls: Vec<String> = self
            .generations
            .lock()
            .expect("store mutex poisoned")
            .get(name)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        urls.sort();
        Ok(urls)
    }
}
