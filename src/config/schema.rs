//! Configuration schema for gencache
//!
//! Configuration is stored at `~/.config/gencache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache generation settings
    pub cache: CacheConfig,

    /// Asset manifest pre-populated at install
    pub manifest: ManifestConfig,

    /// Network and origin settings
    pub network: NetworkConfig,
}

impl Config {
    /// The version-qualified name of the current cache generation
    pub fn generation_name(&self) -> String {
        format!("{}-v{}", self.cache.name, self.cache.version)
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Cache generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Base name shared by all generations of this app
    pub name: String,

    /// Deployment version; bumping it starts a new generation
    pub version: String,

    /// Root directory for on-disk generations (defaults to the state dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "app-shell".to_string(),
            version: "1.0.0".to_string(),
            dir: None,
        }
    }
}

/// Asset manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// URLs written into a new generation at install, in order
    pub assets: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            assets: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/manifest.json".to_string(),
                "/icon-192.png".to_string(),
                "/icon-512.png".to_string(),
            ],
        }
    }
}

/// Network and origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Origin that relative URLs resolve against; responses from it are
    /// same-origin and therefore cacheable
    pub site_origin: String,

    /// URL prefixes classified as external (network-first, never cached on
    /// success)
    pub external_origins: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            site_origin: "http://localhost:8080".to_string(),
            external_origins: vec![
                "https://cdn.tailwindcss.com".to_string(),
                "https://cdnjs.cloudflare.com".to_string(),
                "https://unpkg.com".to_string(),
                "https://pagead2.googlesyndication.com".to_string(),
            ],
        }
    }
}
