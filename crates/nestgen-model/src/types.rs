// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for model construction.
*/

/// Receptor identity key (`"{zone}_{kind}"`), unique across the whole model
pub type ReceptorKey = String;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building a graph model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Duplicate receptor key: {0}")]
    DuplicateReceptor(String),

    #[error("Duplicate brain region: {0}")]
    DuplicateRegion(String),

    #[error("Edge target {target} ({synapse_type} from {from}) does not resolve to a receptor")]
    DanglingEdge {
        from: String,
        synapse_type: String,
        target: String,
    },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),
}
