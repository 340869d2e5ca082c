// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
GeneratorConfigStore - persisted stimulus-generator parameters.

Reconciles a JSON file of per-receptor generator settings against the set of
generator-bearing receptors in the model. Receptors without an entry get
process-wide defaults. The file is written back only when no prior state
existed (first-run bootstrap); defaults synthesized on later runs are used
for generation but never persisted. A failed write is reported through
[`PersistOutcome`] instead of aborting, since the artifacts are already
assembled by the time persistence runs.
*/

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nestgen_model::GraphModel;

use crate::types::{GenError, GenResult};

/// Default generator onset time (ms)
pub const GENERATOR_START_TIME_DEFAULT: f64 = 1.0;
/// Default generator offset time (ms)
pub const GENERATOR_STOP_TIME_DEFAULT: f64 = 600.0;
/// Default generator firing rate (Hz)
pub const GENERATOR_RATE_DEFAULT: f64 = 250.0;
/// Default generator weight coefficient
pub const GENERATOR_COEF_DEFAULT: f64 = 1.0;

/// Stimulus-generator parameters for one receptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub start_time: f64,
    pub stop_time: f64,
    pub rate: f64,
    pub coef: f64,
    pub name: String,
}

impl GeneratorConfig {
    /// Process-wide default configuration for a receptor
    pub fn default_for(key: &str) -> Self {
        Self {
            start_time: GENERATOR_START_TIME_DEFAULT,
            stop_time: GENERATOR_STOP_TIME_DEFAULT,
            rate: GENERATOR_RATE_DEFAULT,
            coef: GENERATOR_COEF_DEFAULT,
            name: key.to_string(),
        }
    }
}

/// Result of attempting to persist the store
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    /// First-run bootstrap write succeeded
    Written,
    /// Prior state existed; nothing written by design
    SkippedExisting,
    /// The bootstrap write failed; generation output is unaffected
    Failed(String),
}

/// Persisted mapping from receptor identity key to [`GeneratorConfig`]
#[derive(Debug)]
pub struct GeneratorConfigStore {
    path: PathBuf,
    configs: BTreeMap<String, GeneratorConfig>,
    /// True when no persisted state existed at load time
    bootstrap: bool,
}

impl GeneratorConfigStore {
    /// Load the store from the given path
    ///
    /// An absent file yields an empty store flagged for a bootstrap write.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::PersistedStateCorrupt`] when the file exists but
    /// cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!(path = %path.display(), "no persisted generator configs, starting empty");
            return Ok(Self {
                path,
                configs: BTreeMap::new(),
                bootstrap: true,
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| GenError::PersistedStateCorrupt(format!("{}: {}", path.display(), e)))?;
        let configs: BTreeMap<String, GeneratorConfig> = serde_json::from_str(&content)
            .map_err(|e| GenError::PersistedStateCorrupt(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), entries = configs.len(), "loaded generator configs");
        Ok(Self {
            path,
            configs,
            bootstrap: false,
        })
    }

    /// Fill gaps with defaults for every generator-bearing receptor
    ///
    /// Returns the keys that received a synthesized default.
    pub fn reconcile(&mut self, model: &GraphModel) -> Vec<String> {
        let mut synthesized = Vec::new();
        for receptor in model.receptors() {
            if !receptor.has_spike_generator() {
                continue;
            }
            let key = receptor.key();
            if !self.configs.contains_key(&key) {
                debug!(receptor = %key, "no generator config found, adding default");
                self.configs.insert(key.clone(), GeneratorConfig::default_for(&key));
                synthesized.push(key);
            }
        }
        synthesized
    }

    /// Configuration for a receptor, if present
    pub fn config(&self, key: &str) -> Option<&GeneratorConfig> {
        self.configs.get(key)
    }

    /// All configurations keyed by receptor identity
    pub fn configs(&self) -> &BTreeMap<String, GeneratorConfig> {
        &self.configs
    }

    /// Whether this run started with no persisted state
    pub fn is_bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Write the store back, first run only
    ///
    /// Never fails the run: a write error is surfaced as
    /// [`PersistOutcome::Failed`] for the caller to report.
    pub fn persist(&self) -> PersistOutcome {
        if !self.bootstrap {
            return PersistOutcome::SkippedExisting;
        }
        match serde_json::to_string_pretty(&self.configs)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&self.path, json).map_err(|e| e.to_string()))
        {
            Ok(()) => PersistOutcome::Written,
            Err(detail) => {
                warn!(path = %self.path.display(), %detail, "generator config write failed");
                PersistOutcome::Failed(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestgen_model::GraphModel;
    use tempfile::tempdir;

    fn generator_model() -> GraphModel {
        let mut builder = GraphModel::builder();
        builder.add_region("visual").unwrap();
        builder
            .add_receptor("visual", "exc", "iaf_psc_exp", true)
            .unwrap();
        builder
            .add_receptor("visual", "inh", "iaf_psc_exp", false)
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_bootstrap_load_and_persist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generator_config.json");

        let mut store = GeneratorConfigStore::load(&path).unwrap();
        assert!(store.is_bootstrap());

        let synthesized = store.reconcile(&generator_model());
        assert_eq!(synthesized, vec!["visual_exc"]);
        assert!(store.config("visual_inh").is_none());

        assert_eq!(store.persist(), PersistOutcome::Written);
        assert!(path.exists());

        // Reload sees the persisted defaults
        let reloaded = GeneratorConfigStore::load(&path).unwrap();
        assert!(!reloaded.is_bootstrap());
        let config = reloaded.config("visual_exc").unwrap();
        assert_eq!(config.start_time, GENERATOR_START_TIME_DEFAULT);
        assert_eq!(config.rate, GENERATOR_RATE_DEFAULT);
        assert_eq!(config.name, "visual_exc");
    }

    #[test]
    fn test_persisted_schema_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generator_config.json");

        let mut store = GeneratorConfigStore::load(&path).unwrap();
        store.reconcile(&generator_model());
        store.persist();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value["visual_exc"];
        assert!(entry["startTime"].is_f64());
        assert!(entry["stopTime"].is_f64());
        assert!(entry["rate"].is_f64());
        assert!(entry["coef"].is_f64());
        assert_eq!(entry["name"], "visual_exc");
    }

    #[test]
    fn test_subsequent_run_never_writes_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generator_config.json");
        std::fs::write(&path, "{}").unwrap();

        let mut store = GeneratorConfigStore::load(&path).unwrap();
        assert!(!store.is_bootstrap());
        let synthesized = store.reconcile(&generator_model());
        assert_eq!(synthesized, vec!["visual_exc"]);

        assert_eq!(store.persist(), PersistOutcome::SkippedExisting);
        // The synthesized default is available in memory but not on disk
        assert!(store.config("visual_exc").is_some());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_corrupt_state_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generator_config.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = GeneratorConfigStore::load(&path);
        assert!(matches!(result, Err(GenError::PersistedStateCorrupt(_))));
    }

    #[test]
    fn test_unreadable_state_is_corrupt() {
        let dir = tempdir().unwrap();
        // The store path exists but is a directory, so it cannot be read
        let path = dir.path().join("generator_config.json");
        std::fs::create_dir(&path).unwrap();

        let result = GeneratorConfigStore::load(&path);
        assert!(matches!(result, Err(GenError::PersistedStateCorrupt(_))));
    }

    #[test]
    fn test_failed_bootstrap_write_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("generator_config.json");

        let mut store = GeneratorConfigStore::load(&path).unwrap();
        assert!(store.is_bootstrap());
        store.reconcile(&generator_model());

        assert!(matches!(store.persist(), PersistOutcome::Failed(_)));
        assert!(!path.exists());
        // The synthesized defaults are still usable in memory
        assert!(store.config("visual_exc").is_some());
    }

    #[test]
    fn test_existing_entries_survive_reconcile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("generator_config.json");
        let existing = r#"{"visual_exc": {"startTime": 5.0, "stopTime": 50.0, "rate": 10.0, "coef": 0.5, "name": "visual_exc"}}"#;
        std::fs::write(&path, existing).unwrap();

        let mut store = GeneratorConfigStore::load(&path).unwrap();
        let synthesized = store.reconcile(&generator_model());

        assert!(synthesized.is_empty());
        let config = store.config("visual_exc").unwrap();
        assert_eq!(config.start_time, 5.0);
        assert_eq!(config.rate, 10.0);
    }
}
