// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
SynapseRoutingTable - synapse types and their optional custom connection models.

Entries iterate in insertion order; the table's declared order is part of the
generated-script ordering contract, so it lives in a `Vec` rather than a map.
*/

use ahash::AHashMap;

/// Routing table mapping synapse-type names to optional custom connection models
///
/// A synapse type with no custom model produces discrete weighted links; a
/// custom-routed type additionally produces a model-level bulk connection per
/// source receptor.
#[derive(Debug, Clone, Default)]
pub struct SynapseRoutingTable {
    /// (synapse type, custom connection model) in insertion order
    entries: Vec<(String, Option<String>)>,
    index: AHashMap<String, usize>,
}

impl SynapseRoutingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain synapse type (discrete weighted links only)
    pub fn add(&mut self, synapse_type: &str) -> &mut Self {
        self.insert(synapse_type, None)
    }

    /// Register a synapse type routed through a custom connection model
    pub fn add_with_model(&mut self, synapse_type: &str, model_name: &str) -> &mut Self {
        self.insert(synapse_type, Some(model_name.to_string()))
    }

    fn insert(&mut self, synapse_type: &str, model: Option<String>) -> &mut Self {
        match self.index.get(synapse_type) {
            // Re-registration overrides the routing but keeps the position
            Some(&idx) => self.entries[idx].1 = model,
            None => {
                self.index
                    .insert(synapse_type.to_string(), self.entries.len());
                self.entries.push((synapse_type.to_string(), model));
            }
        }
        self
    }

    /// Custom connection model for a synapse type, if any
    ///
    /// `None` means either "discrete weighted connection" or an unknown
    /// synapse type; use [`SynapseRoutingTable::contains`] to distinguish.
    pub fn custom_model(&self, synapse_type: &str) -> Option<&str> {
        self.index
            .get(synapse_type)
            .and_then(|&idx| self.entries[idx].1.as_deref())
    }

    /// Whether the synapse type is registered at all
    pub fn contains(&self, synapse_type: &str) -> bool {
        self.index.contains_key(synapse_type)
    }

    /// All synapse types in insertion order
    pub fn synapse_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Custom-routed entries `(synapse type, model)` in insertion order
    pub fn custom_routed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, model)| model.as_deref().map(|m| (name.as_str(), m)))
    }

    /// Number of registered synapse types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
