// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Population-definition script body (the `data.py` artifact).

Emits, per region: size assignments with floor guards, the parenthesized
population table (`nest.Create` per receptor), and the 0-based index
variables the runtime handles are built from. Statement order follows
region then receptor declaration order.
*/

use std::fmt::Write;

use nestgen_model::{size_var_name, GraphModel};

use crate::allocation::AllocationMap;
use crate::types::{GenError, GenResult};

/// Variable naming the total neuron budget in the generated script
pub const VAR_TOTAL_NEURONS: &str = "number_of_neuron";

/// Variable naming the population floor in the generated script
pub const VAR_POPULATION_FLOOR: &str = "DEFAULT";

/// Builds the population-definition body from computed allocations
#[derive(Debug)]
pub struct PopulationScriptBuilder<'a> {
    model: &'a GraphModel,
    allocations: &'a AllocationMap,
    total_budget: u64,
    floor: u64,
}

impl<'a> PopulationScriptBuilder<'a> {
    /// Create a builder over a model and its allocations
    pub fn new(
        model: &'a GraphModel,
        allocations: &'a AllocationMap,
        total_budget: u64,
        floor: u64,
    ) -> Self {
        Self {
            model,
            allocations,
            total_budget,
            floor,
        }
    }

    /// Assemble the full body text
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingPropertyCount`] if the allocation map lacks
    /// an entry for any receptor.
    pub fn body(&self) -> GenResult<String> {
        let mut out = String::new();
        let _ = writeln!(out, "{} = {}", VAR_TOTAL_NEURONS, self.total_budget);
        let _ = writeln!(out, "{} = {}", VAR_POPULATION_FLOOR, self.floor);

        for region in self.model.regions() {
            for receptor in region.receptors() {
                let key = receptor.key();
                let size = self.allocation_for(&key)?;
                let var = size_var_name(&key);
                let _ = writeln!(out, "{} = {}", var, size);
                let _ = writeln!(
                    out,
                    "if {var} < {floor} : {var} = {floor}",
                    var = var,
                    floor = VAR_POPULATION_FLOOR
                );
            }
            out.push('\n');

            let _ = writeln!(out, "{} = (", region.zone_name());
            let receptor_count = region.receptors().len();
            for (i, receptor) in region.receptors().iter().enumerate() {
                let key = receptor.key();
                let var = size_var_name(&key);
                let _ = write!(
                    out,
                    "{{'Name': '{key}', 'NN': {var}, 'Model': '{model}', 'IDs': nest.Create('{model}', {var})}}",
                    key = key,
                    var = var,
                    model = receptor.neuron_model()
                );
                // Single-entry tables keep the trailing comma so Python
                // still parses the table as a tuple
                if i < receptor_count - 1 || receptor_count == 1 {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(")\n");

            for (i, receptor) in region.receptors().iter().enumerate() {
                let _ = writeln!(out, "{} = {}", receptor.key(), i);
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn allocation_for(&self, key: &str) -> GenResult<u64> {
        self.allocations
            .get(key)
            .copied()
            .ok_or_else(|| GenError::MissingPropertyCount(key.to_string()))
    }
}
