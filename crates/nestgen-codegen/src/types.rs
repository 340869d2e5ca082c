// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for the generation pipeline.
*/

/// Raw population counts keyed by receptor identity
pub type PropertyCountMap = ahash::AHashMap<String, u64>;

/// Synaptic weights keyed by `"{from_key}-{to_key}"`
pub type WeightMap = ahash::AHashMap<String, f64>;

/// Result type for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation run
///
/// Every variant is fatal at the point it occurs; artifacts are written only
/// after full assembly, so an aborted run leaves no partial output.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("Empirical data source {0} cannot be resolved")]
    MissingDataSource(String),

    #[error("No weight entry for connection {from}-{to}")]
    MissingWeightEntry { from: String, to: String },

    #[error("Persisted generator-config store is corrupt: {0}")]
    PersistedStateCorrupt(String),

    #[error("Template {0} cannot be loaded")]
    TemplateMissing(String),

    #[error("No property count for receptor {0}")]
    MissingPropertyCount(String),

    #[error("Invalid model: {0}")]
    InvalidModel(#[from] nestgen_model::ModelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
