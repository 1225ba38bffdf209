//! Origin classification
//!
//! A request is external iff its URL starts with any prefix in the
//! configured external-origin allowlist. Pure, no failure modes.

use std::fmt;

/// Classification of a request target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Served cache-first, cacheable on miss
    Local,
    /// Served network-first, never cached on success
    External,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Classifies request URLs against an external-origin prefix allowlist
#[derive(Debug, Clone)]
pub struct OriginClassifier {
    external_prefixes: Vec<String>,
}

impl OriginClassifier {
    /// Create a classifier from the allowlist prefixes
    pub fn new(external_prefixes: Vec<String>) -> Self {
        Self { external_prefixes }
    }

    /// Classify a request URL
    pub fn classify(&self, url: &str) -> Origin {
        if self
            .external_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
        {
            Origin::External
        } else {
            Origin::Local
        }
    }

    /// Whether a URL is classified external
    pub fn is_external(&self, url: &str) -> bool {
        self.classify(url) == Origin::External
    }
}
