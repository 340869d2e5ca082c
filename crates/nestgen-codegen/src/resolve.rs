// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Count and weight resolution from empirical data sources.

Each receptor names one count source (its identity key) and each directed
connection names one weight source (`"{from}-{to}"`). Resolution produces
explicit maps that are threaded into allocation and script synthesis; no
process-wide state.
*/

use tracing::debug;

use nestgen_model::{weight_key, GraphModel};

use crate::catalog::DataCatalog;
use crate::types::{GenError, GenResult, PropertyCountMap, WeightMap};

/// Resolves raw population counts for every receptor in the model
///
/// With a manual override set, the override is the sole basis for every
/// count and no source is consulted. Otherwise each receptor's count comes
/// from its named source; an unresolvable source is fatal.
#[derive(Debug)]
pub struct PropertyCountResolver<'a, C: DataCatalog> {
    catalog: &'a C,
    override_count: Option<u64>,
}

impl<'a, C: DataCatalog> PropertyCountResolver<'a, C> {
    /// Create a resolver over the given catalog
    pub fn new(catalog: &'a C, override_count: Option<u64>) -> Self {
        Self {
            catalog,
            override_count,
        }
    }

    /// Resolve one count per receptor, keyed by receptor identity
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingDataSource`] in bulk mode when a receptor's
    /// named source cannot be resolved.
    pub fn resolve(&self, model: &GraphModel) -> GenResult<PropertyCountMap> {
        let mut counts = PropertyCountMap::default();

        if let Some(value) = self.override_count {
            debug!(value, "manual count override active, skipping sources");
            for receptor in model.receptors() {
                counts.insert(receptor.key(), value);
            }
            return Ok(counts);
        }

        for receptor in model.receptors() {
            let key = receptor.key();
            let count = self
                .catalog
                .count_source(&key)?
                .ok_or_else(|| GenError::MissingDataSource(key.clone()))?;
            debug!(source = %key, count, "resolved receptor count");
            counts.insert(key, count);
        }
        Ok(counts)
    }
}

/// Resolves synaptic weights for every connected receptor pair in the model
#[derive(Debug)]
pub struct WeightResolver<'a, C: DataCatalog> {
    catalog: &'a C,
}

impl<'a, C: DataCatalog> WeightResolver<'a, C> {
    /// Create a resolver over the given catalog
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Resolve one weight per directed connection, keyed by `"{from}-{to}"`
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingDataSource`] when a connection's named
    /// source cannot be resolved.
    pub fn resolve(&self, model: &GraphModel) -> GenResult<WeightMap> {
        let mut weights = WeightMap::default();

        for receptor in model.receptors() {
            let from = receptor.key();
            for (_, targets) in receptor.edges() {
                for target in targets {
                    let link = weight_key(&from, target);
                    if weights.contains_key(&link) {
                        continue;
                    }
                    let weight = self
                        .catalog
                        .weight_source(&link)?
                        .ok_or_else(|| GenError::MissingDataSource(link.clone()))?;
                    debug!(source = %link, weight, "resolved link weight");
                    weights.insert(link, weight);
                }
            }
        }
        Ok(weights)
    }
}
