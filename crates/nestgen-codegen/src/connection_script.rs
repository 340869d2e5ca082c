// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity, stimulus and instrumentation script bodies (`neuromodulation.py`).

Three bodies are produced:

- **connections**: model-level bulk statements for custom-routed synapse
  types, a blank separator, then discrete weighted statements for every
  synapse type in the routing table. A custom-routed type yields both kinds
  for the same source receptor; that duplication matches the established
  script format and is kept.
- **generators**: one statement per generator-bearing receptor.
- **instruments**: a detector and a multimeter statement per receptor.

Ordering everywhere: region declaration order, receptor declaration order,
routing-table declaration order, target declaration order.
*/

use std::fmt::Write;

use tracing::debug;

use nestgen_model::{population_handle, weight_key, GraphModel, SynapseRoutingTable};

use crate::generator_store::{GeneratorConfig, GeneratorConfigStore};
use crate::types::{GenError, GenResult, WeightMap};

/// Builds the connectivity/stimulus/instrumentation bodies
#[derive(Debug)]
pub struct ConnectionScriptBuilder<'a> {
    model: &'a GraphModel,
    routing: &'a SynapseRoutingTable,
    weights: &'a WeightMap,
    store: &'a GeneratorConfigStore,
}

impl<'a> ConnectionScriptBuilder<'a> {
    /// Create a builder over the model and its resolved collaborators
    pub fn new(
        model: &'a GraphModel,
        routing: &'a SynapseRoutingTable,
        weights: &'a WeightMap,
        store: &'a GeneratorConfigStore,
    ) -> Self {
        Self {
            model,
            routing,
            weights,
            store,
        }
    }

    /// Assemble the connections body
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingWeightEntry`] when a discrete connection
    /// has no weight; no statement is ever silently skipped.
    pub fn connections_body(&self) -> GenResult<String> {
        let mut out = String::new();

        // Bulk model-level connections for custom-routed synapse types.
        // One statement per (receptor, synapse type) pair with edges; pairs
        // routed to the same model are not deduplicated.
        for region in self.model.regions() {
            for receptor in region.receptors() {
                let from = population_handle(receptor.zone(), receptor.kind());
                for (synapse_type, model_name) in self.routing.custom_routed() {
                    if !receptor.connected(synapse_type).is_empty() {
                        let _ = writeln!(out, "nest.Connect({}[k_IDs], {})", from, model_name);
                    }
                }
            }
        }
        out.push_str("\n\n");

        for region in self.model.regions() {
            for receptor in region.receptors() {
                let from_key = receptor.key();
                let from = population_handle(receptor.zone(), receptor.kind());
                for synapse_type in self.routing.synapse_types() {
                    for target in receptor.connected(synapse_type) {
                        let to = self
                            .model
                            .receptor(target)
                            .map(|r| population_handle(r.zone(), r.kind()))
                            .ok_or_else(|| GenError::MissingWeightEntry {
                                from: from_key.clone(),
                                to: target.clone(),
                            })?;
                        let link = weight_key(&from_key, target);
                        debug!(link = %link, "resolving connection weight");
                        let weight = self.weights.get(&link).copied().ok_or_else(|| {
                            GenError::MissingWeightEntry {
                                from: from_key.clone(),
                                to: target.clone(),
                            }
                        })?;
                        let _ = writeln!(
                            out,
                            "connect({}, {}, syn_type={}, weight_coef={:.9})",
                            from, to, synapse_type, weight
                        );
                    }
                }
            }
        }
        Ok(out)
    }

    /// Assemble the stimulus-generator body
    pub fn generators_body(&self) -> String {
        let mut out = String::new();
        for region in self.model.regions() {
            for receptor in region.receptors() {
                if !receptor.has_spike_generator() {
                    continue;
                }
                let key = receptor.key();
                let config = self
                    .store
                    .config(&key)
                    .cloned()
                    .unwrap_or_else(|| GeneratorConfig::default_for(&key));
                let _ = writeln!(
                    out,
                    "connect_generator({}, startTime={:.9}, stopTime={:.9}, rate={:.9}, coef_part={:.9})",
                    population_handle(receptor.zone(), receptor.kind()),
                    config.start_time,
                    config.stop_time,
                    config.rate,
                    config.coef
                );
            }
        }
        out
    }

    /// Assemble the detector-and-multimeter body
    pub fn instruments_body(&self) -> String {
        let mut out = String::new();
        for region in self.model.regions() {
            for receptor in region.receptors() {
                let handle = population_handle(receptor.zone(), receptor.kind());
                let _ = writeln!(out, "connect_detector({})", handle);
                let _ = writeln!(out, "connect_multimeter({})", handle);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator_store::GeneratorConfigStore;
    use nestgen_model::GraphModel;
    use tempfile::tempdir;

    fn wired_model() -> (GraphModel, SynapseRoutingTable, WeightMap) {
        let mut builder = GraphModel::builder();
        builder.add_region("A").unwrap();
        builder.add_receptor("A", "exc", "iaf_psc_exp", true).unwrap();
        builder.add_receptor("A", "inh", "iaf_psc_exp", false).unwrap();
        builder.add_region("B").unwrap();
        builder.add_receptor("B", "exc", "iaf_psc_exp", false).unwrap();
        builder.connect("A_exc", "Glu", "A_inh");
        builder.connect("A_exc", "Glu", "B_exc");
        builder.connect("A_exc", "DA_ex", "B_exc");
        builder.connect("A_inh", "GABA", "A_exc");
        let model = builder.build().unwrap();

        let mut routing = SynapseRoutingTable::new();
        routing
            .add("Glu")
            .add("GABA")
            .add_with_model("DA_ex", "dopa_model_ex");

        let mut weights = WeightMap::default();
        weights.insert("A_exc-A_inh".to_string(), 0.5);
        weights.insert("A_exc-B_exc".to_string(), 1.25);
        weights.insert("A_inh-A_exc".to_string(), -2.0);
        (model, routing, weights)
    }

    fn empty_store() -> GeneratorConfigStore {
        let dir = tempdir().unwrap();
        GeneratorConfigStore::load(dir.path().join("gc.json")).unwrap()
    }

    #[test]
    fn test_connections_body_layout() {
        let (model, routing, weights) = wired_model();
        let store = empty_store();
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let body = builder.connections_body().unwrap();
        let expected = "\
nest.Connect(A[A_exc][k_IDs], dopa_model_ex)


connect(A[A_exc], A[A_inh], syn_type=Glu, weight_coef=0.500000000)
connect(A[A_exc], B[B_exc], syn_type=Glu, weight_coef=1.250000000)
connect(A[A_exc], B[B_exc], syn_type=DA_ex, weight_coef=1.250000000)
connect(A[A_inh], A[A_exc], syn_type=GABA, weight_coef=-2.000000000)
";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_custom_routed_type_emits_bulk_and_discrete() {
        let (model, routing, weights) = wired_model();
        let store = empty_store();
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let body = builder.connections_body().unwrap();
        assert!(body.contains("nest.Connect(A[A_exc][k_IDs], dopa_model_ex)"));
        assert!(body.contains("syn_type=DA_ex"));
    }

    #[test]
    fn test_missing_weight_is_fatal() {
        let (model, routing, mut weights) = wired_model();
        weights.remove("A_inh-A_exc");
        let store = empty_store();
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let result = builder.connections_body();
        assert!(matches!(
            result,
            Err(GenError::MissingWeightEntry { from, to }) if from == "A_inh" && to == "A_exc"
        ));
    }

    #[test]
    fn test_unrouted_synapse_types_are_ignored() {
        let (model, _, weights) = wired_model();
        // Table without GABA: its edges must produce nothing
        let mut routing = SynapseRoutingTable::new();
        routing.add("Glu").add_with_model("DA_ex", "dopa_model_ex");
        let store = empty_store();
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let body = builder.connections_body().unwrap();
        assert!(!body.contains("GABA"));
    }

    #[test]
    fn test_generators_body_uses_store_and_defaults() {
        let (model, routing, weights) = wired_model();
        let mut store = empty_store();
        store.reconcile(&model);
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let body = builder.generators_body();
        assert_eq!(
            body,
            "connect_generator(A[A_exc], startTime=1.000000000, stopTime=600.000000000, rate=250.000000000, coef_part=1.000000000)\n"
        );
    }

    #[test]
    fn test_instruments_body_pairs_per_receptor() {
        let (model, routing, weights) = wired_model();
        let store = empty_store();
        let builder = ConnectionScriptBuilder::new(&model, &routing, &weights, &store);

        let body = builder.instruments_body();
        let expected = "\
connect_detector(A[A_exc])
connect_multimeter(A[A_exc])
connect_detector(A[A_inh])
connect_multimeter(A[A_inh])
connect_detector(B[B_exc])
connect_multimeter(B[B_exc])
";
        assert_eq!(body, expected);
    }
}
