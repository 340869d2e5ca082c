// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
DataCatalog - named empirical data sources for counts and weights.

The resolvers never touch the filesystem directly; they go through this trait
so tests (and alternative deployments) can supply sources in memory.

A `None` return means "this catalog has no such source"; deciding whether
that is fatal belongs to the caller.
*/

use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::types::{GenError, GenResult};

/// Provider of named empirical data sources
pub trait DataCatalog {
    /// Population count carried by the named source, if the source exists
    fn count_source(&self, name: &str) -> GenResult<Option<u64>>;

    /// Synaptic weight carried by the named source, if the source exists
    fn weight_source(&self, name: &str) -> GenResult<Option<f64>>;
}

/// Filesystem-backed catalog
///
/// Layout under the catalog root:
///
/// ```text
/// <root>/counts/<name>.json    (a bare JSON number)
/// <root>/weights/<name>.json   (a bare JSON number)
/// ```
#[derive(Debug, Clone)]
pub struct FsDataCatalog {
    root: PathBuf,
}

impl FsDataCatalog {
    /// Create a catalog rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_source<V: serde::de::DeserializeOwned>(&self, path: &Path) -> GenResult<Option<V>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let value: V = serde_json::from_str(content.trim()).map_err(|e| {
            GenError::MissingDataSource(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }
}

impl DataCatalog for FsDataCatalog {
    fn count_source(&self, name: &str) -> GenResult<Option<u64>> {
        let path = self.root.join("counts").join(format!("{}.json", name));
        self.read_source(&path)
    }

    fn weight_source(&self, name: &str) -> GenResult<Option<f64>> {
        let path = self.root.join("weights").join(format!("{}.json", name));
        self.read_source(&path)
    }
}

/// In-memory catalog used by tests and embedding callers
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    counts: AHashMap<String, u64>,
    weights: AHashMap<String, f64>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a count source
    pub fn with_count(mut self, name: &str, count: u64) -> Self {
        self.counts.insert(name.to_string(), count);
        self
    }

    /// Register a weight source
    pub fn with_weight(mut self, name: &str, weight: f64) -> Self {
        self.weights.insert(name.to_string(), weight);
        self
    }
}

impl DataCatalog for MemoryCatalog {
    fn count_source(&self, name: &str) -> GenResult<Option<u64>> {
        Ok(self.counts.get(name).copied())
    }

    fn weight_source(&self, name: &str) -> GenResult<Option<f64>> {
        Ok(self.weights.get(name).copied())
    }
}
