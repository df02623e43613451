//! Iterator settings loaded from YAML
//!
//! Only the run limits live here. Fetch and advance functions are code and are
//! always supplied through the builder.
//!
//! ```yaml
//! max_pages: 200
//! timeout_ms: 30000
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Run limits applied to a [`PagedIteratorBuilder`](crate::pagination::PagedIteratorBuilder)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IteratorSettings {
    /// Stop successfully after this many pages
    #[serde(default)]
    pub max_pages: Option<u64>,

    /// Fail a run that takes longer than this many milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl IteratorSettings {
    /// Create empty settings (no limits)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max pages
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Overlay non-empty fields from `other`
    #[must_use]
    pub fn merge(mut self, other: &IteratorSettings) -> Self {
        if other.max_pages.is_some() {
            self.max_pages = other.max_pages;
        }
        if other.timeout_ms.is_some() {
            self.timeout_ms = other.timeout_ms;
        }
        self
    }

    /// Reject zero limits
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == Some(0) {
            return Err(Error::invalid_value("max_pages", "must be greater than zero"));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::invalid_value("timeout_ms", "must be greater than zero"));
        }
        Ok(())
    }

    /// Parse and validate settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document means "no limits"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: IteratorSettings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read settings file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }
}
