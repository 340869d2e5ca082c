// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
GraphModel - immutable-after-build representation of brain regions.

Holds the ordered region/receptor structure plus the directed, synapse-typed
connectivity between receptors. Receptors reference their owning region by
zone name and their connection targets by identity key; every key is resolved
against the model index, so there are no object back-pointers.
*/

use ahash::AHashMap;

use crate::naming::population_key;
use crate::types::{ModelError, ModelResult, ReceptorKey};

/// A typed neuron population within a brain region
///
/// The unit of connectivity and allocation. Identity key = `"{zone}_{kind}"`.
#[derive(Debug, Clone)]
pub struct Receptor {
    zone: String,
    kind: String,
    neuron_model: String,
    spike_generator: bool,
    /// Outgoing edges, grouped per synapse type in declaration order
    edges: Vec<(String, Vec<ReceptorKey>)>,
    edge_index: AHashMap<String, usize>,
}

impl Receptor {
    /// Owning region's zone name
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Receptor kind within the zone (e.g. `exc`, `inh`)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// NEST neuron model instantiated for this population
    pub fn neuron_model(&self) -> &str {
        &self.neuron_model
    }

    /// Whether a spike generator is attached to this population
    pub fn has_spike_generator(&self) -> bool {
        self.spike_generator
    }

    /// Identity key (`"{zone}_{kind}"`)
    pub fn key(&self) -> String {
        population_key(&self.zone, &self.kind)
    }

    /// Target receptor keys connected under the given synapse type
    ///
    /// Returns an empty slice when the receptor has no outgoing edges of
    /// that type.
    pub fn connected(&self, synapse_type: &str) -> &[ReceptorKey] {
        match self.edge_index.get(synapse_type) {
            Some(&idx) => &self.edges[idx].1,
            None => &[],
        }
    }

    /// All outgoing edge groups in declaration order
    pub fn edges(&self) -> &[(String, Vec<ReceptorKey>)] {
        &self.edges
    }
}

/// A named grouping ("zone") of receptor populations
///
/// Receptor order is significant: it fixes the ordering of generated
/// statements and the 0-based population indices.
#[derive(Debug, Clone)]
pub struct BrainRegion {
    zone_name: String,
    receptors: Vec<Receptor>,
}

impl BrainRegion {
    /// Unique zone name
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Receptors in declaration order
    pub fn receptors(&self) -> &[Receptor] {
        &self.receptors
    }
}

/// Immutable graph model of brain regions and receptors
///
/// Built once via [`GraphModelBuilder`]; read-only afterwards. Iteration
/// follows declaration order, which is what makes generation deterministic.
#[derive(Debug, Clone)]
pub struct GraphModel {
    regions: Vec<BrainRegion>,
    /// receptor key -> (region index, receptor index)
    index: AHashMap<ReceptorKey, (usize, usize)>,
}

impl GraphModel {
    /// Start building a model
    pub fn builder() -> GraphModelBuilder {
        GraphModelBuilder::new()
    }

    /// Regions in declaration order
    pub fn regions(&self) -> &[BrainRegion] {
        &self.regions
    }

    /// Look up a receptor by identity key
    pub fn receptor(&self, key: &str) -> Option<&Receptor> {
        self.index
            .get(key)
            .map(|&(r, i)| &self.regions[r].receptors[i])
    }

    /// All receptors in region order then receptor order
    pub fn receptors(&self) -> impl Iterator<Item = &Receptor> {
        self.regions.iter().flat_map(|region| region.receptors.iter())
    }

    /// Total number of receptors across all regions
    pub fn receptor_count(&self) -> usize {
        self.index.len()
    }
}

/// Validating builder for [`GraphModel`]
///
/// Regions, receptors and edges are declared in the order they should appear
/// in generated output. `build` resolves and validates all edges, so dangling
/// targets surface as [`ModelError::DanglingEdge`] instead of failing deep in
/// generation.
#[derive(Debug, Default)]
pub struct GraphModelBuilder {
    regions: Vec<BrainRegion>,
    region_index: AHashMap<String, usize>,
    keys: AHashMap<ReceptorKey, (usize, usize)>,
    /// (from key, synapse type, to key) in declaration order
    pending_edges: Vec<(ReceptorKey, String, ReceptorKey)>,
}

impl GraphModelBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a brain region
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateRegion`] if the zone name is taken.
    pub fn add_region(&mut self, zone_name: &str) -> ModelResult<&mut Self> {
        if self.region_index.contains_key(zone_name) {
            return Err(ModelError::DuplicateRegion(zone_name.to_string()));
        }
        self.region_index
            .insert(zone_name.to_string(), self.regions.len());
        self.regions.push(BrainRegion {
            zone_name: zone_name.to_string(),
            receptors: Vec::new(),
        });
        Ok(self)
    }

    /// Declare a receptor within an existing region
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRegion`] if the region was never declared
    /// and [`ModelError::DuplicateReceptor`] if the `"{zone}_{kind}"` key is
    /// already taken.
    pub fn add_receptor(
        &mut self,
        zone_name: &str,
        kind: &str,
        neuron_model: &str,
        spike_generator: bool,
    ) -> ModelResult<&mut Self> {
        let region_idx = *self
            .region_index
            .get(zone_name)
            .ok_or_else(|| ModelError::InvalidRegion(zone_name.to_string()))?;

        let key = population_key(zone_name, kind);
        if self.keys.contains_key(&key) {
            return Err(ModelError::DuplicateReceptor(key));
        }

        let region = &mut self.regions[region_idx];
        self.keys.insert(key, (region_idx, region.receptors.len()));
        region.receptors.push(Receptor {
            zone: zone_name.to_string(),
            kind: kind.to_string(),
            neuron_model: neuron_model.to_string(),
            spike_generator,
            edges: Vec::new(),
            edge_index: AHashMap::new(),
        });
        Ok(self)
    }

    /// Declare a directed edge between two receptors under a synapse type
    ///
    /// Both endpoints are referenced by identity key and may be declared
    /// later; resolution happens in [`GraphModelBuilder::build`].
    pub fn connect(&mut self, from_key: &str, synapse_type: &str, to_key: &str) -> &mut Self {
        self.pending_edges.push((
            from_key.to_string(),
            synapse_type.to_string(),
            to_key.to_string(),
        ));
        self
    }

    /// Resolve all edges and produce the immutable model
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DanglingEdge`] if either endpoint of an edge
    /// does not resolve to a declared receptor.
    pub fn build(mut self) -> ModelResult<GraphModel> {
        for (from, synapse_type, to) in std::mem::take(&mut self.pending_edges) {
            let &(region_idx, receptor_idx) =
                self.keys
                    .get(&from)
                    .ok_or_else(|| ModelError::DanglingEdge {
                        from: from.clone(),
                        synapse_type: synapse_type.clone(),
                        target: from.clone(),
                    })?;
            if !self.keys.contains_key(&to) {
                return Err(ModelError::DanglingEdge {
                    from,
                    synapse_type,
                    target: to,
                });
            }

            let receptor = &mut self.regions[region_idx].receptors[receptor_idx];
            match receptor.edge_index.get(&synapse_type) {
                Some(&idx) => receptor.edges[idx].1.push(to),
                None => {
                    receptor
                        .edge_index
                        .insert(synapse_type.clone(), receptor.edges.len());
                    receptor.edges.push((synapse_type, vec![to]));
                }
            }
        }

        Ok(GraphModel {
            regions: self.regions,
            index: self.keys,
        })
    }
}
