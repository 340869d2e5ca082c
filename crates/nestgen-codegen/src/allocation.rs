// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
PopulationAllocator - proportional scaling of raw counts to a neuron budget.

Raw empirical counts are rescaled to the target total `T`: each receptor gets
`floor(count / total * T)`, clamped up to the per-population floor. A
population below the floor would make the generated simulation ill-formed, so
the floor wins over proportionality. Truncation means the aggregate can
undershoot `T`; that is accepted, not corrected.
*/

use tracing::debug;

use nestgen_model::GraphModel;

use crate::types::{GenError, GenResult, PropertyCountMap};

/// Default minimum population size (`DEFAULT` in the generated script)
pub const DEFAULT_POPULATION_FLOOR: u64 = 10;

/// Computed population sizes keyed by receptor identity
pub type AllocationMap = ahash::AHashMap<String, u64>;

/// Rescales raw property counts to a target total neuron budget
#[derive(Debug, Clone)]
pub struct PopulationAllocator {
    total_budget: u64,
    floor: u64,
}

impl PopulationAllocator {
    /// Create an allocator with the default population floor
    pub fn new(total_budget: u64) -> Self {
        Self {
            total_budget,
            floor: DEFAULT_POPULATION_FLOOR,
        }
    }

    /// Override the per-population floor
    pub fn with_floor(mut self, floor: u64) -> Self {
        self.floor = floor;
        self
    }

    /// Target total neuron budget `T`
    pub fn total_budget(&self) -> u64 {
        self.total_budget
    }

    /// Per-population floor `F`
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Compute one allocation per receptor in the model
    ///
    /// # Errors
    ///
    /// Returns [`GenError::MissingPropertyCount`] if the count map lacks an
    /// entry for any receptor; the map must cover the model before
    /// allocation runs.
    pub fn allocate(
        &self,
        model: &GraphModel,
        counts: &PropertyCountMap,
    ) -> GenResult<AllocationMap> {
        let total: u64 = model
            .receptors()
            .map(|r| {
                counts
                    .get(&r.key())
                    .copied()
                    .ok_or_else(|| GenError::MissingPropertyCount(r.key()))
            })
            .sum::<GenResult<u64>>()?;

        debug!(total, budget = self.total_budget, "allocating populations");

        let mut allocations = AllocationMap::default();
        for receptor in model.receptors() {
            let key = receptor.key();
            let count = counts[&key];
            let share = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * self.total_budget as f64
            };
            let allocated = (share.floor() as u64).max(self.floor);
            allocations.insert(key, allocated);
        }
        Ok(allocations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestgen_model::GraphModel;
    use proptest::prelude::*;

    fn model_with_counts(counts: &[(&str, &str, u64)]) -> (GraphModel, PropertyCountMap) {
        let mut builder = GraphModel::builder();
        let mut map = PropertyCountMap::default();
        for (zone, kind, count) in counts {
            // Regions may repeat across entries
            let _ = builder.add_region(zone);
            builder
                .add_receptor(zone, kind, "iaf_psc_exp", false)
                .unwrap();
            map.insert(format!("{}_{}", zone, kind), *count);
        }
        (builder.build().unwrap(), map)
    }

    #[test]
    fn test_exact_proportional_split() {
        // counts sum to the budget and every share clears the floor
        let (model, counts) = model_with_counts(&[
            ("A", "exc", 100),
            ("A", "inh", 50),
            ("B", "exc", 50),
        ]);

        let allocations = PopulationAllocator::new(200).allocate(&model, &counts).unwrap();

        assert_eq!(allocations["A_exc"], 100);
        assert_eq!(allocations["A_inh"], 50);
        assert_eq!(allocations["B_exc"], 50);
    }

    #[test]
    fn test_floor_clamps_small_shares() {
        // each proportional share is 5, below the floor of 10
        let (model, counts) = model_with_counts(&[("X", "n", 1), ("Y", "n", 1)]);

        let allocations = PopulationAllocator::new(10).allocate(&model, &counts).unwrap();

        assert_eq!(allocations["X_n"], 10);
        assert_eq!(allocations["Y_n"], 10);
    }

    #[test]
    fn test_zero_total_falls_back_to_floor() {
        let (model, counts) = model_with_counts(&[("X", "n", 0), ("Y", "n", 0)]);

        let allocations = PopulationAllocator::new(100).allocate(&model, &counts).unwrap();

        assert_eq!(allocations["X_n"], DEFAULT_POPULATION_FLOOR);
        assert_eq!(allocations["Y_n"], DEFAULT_POPULATION_FLOOR);
    }

    #[test]
    fn test_missing_count_is_fatal() {
        let (model, mut counts) = model_with_counts(&[("X", "n", 5), ("Y", "n", 5)]);
        counts.remove("Y_n");

        let result = PopulationAllocator::new(100).allocate(&model, &counts);
        assert!(matches!(
            result,
            Err(GenError::MissingPropertyCount(key)) if key == "Y_n"
        ));
    }

    #[test]
    fn test_equal_counts_equal_split() {
        let (model, counts) =
            model_with_counts(&[("A", "a", 7), ("B", "b", 7), ("C", "c", 7), ("D", "d", 7)]);

        let allocations = PopulationAllocator::new(400).allocate(&model, &counts).unwrap();
        for size in allocations.values() {
            assert_eq!(*size, 100);
        }
    }

    proptest! {
        #[test]
        fn prop_floor_invariant(
            raw in proptest::collection::vec(0u64..10_000, 1..12),
            budget in 1u64..100_000,
            floor in 0u64..100,
        ) {
            let specs: Vec<(String, u64)> = raw
                .iter()
                .enumerate()
                .map(|(i, c)| (format!("z{}", i), *c))
                .collect();
            let mut builder = GraphModel::builder();
            let mut counts = PropertyCountMap::default();
            for (zone, count) in &specs {
                builder.add_region(zone).unwrap();
                builder.add_receptor(zone, "n", "iaf_psc_exp", false).unwrap();
                counts.insert(format!("{}_n", zone), *count);
            }
            let model = builder.build().unwrap();

            let allocations = PopulationAllocator::new(budget)
                .with_floor(floor)
                .allocate(&model, &counts)
                .unwrap();

            for size in allocations.values() {
                prop_assert!(*size >= floor);
            }
        }

        #[test]
        fn prop_truncation_never_overshoots_budget(
            raw in proptest::collection::vec(1u64..10_000, 1..12),
            budget in 1u64..100_000,
        ) {
            // With the floor disabled, pure truncated proportional shares
            // can only undershoot the budget.
            let mut builder = GraphModel::builder();
            let mut counts = PropertyCountMap::default();
            for (i, count) in raw.iter().enumerate() {
                let zone = format!("z{}", i);
                builder.add_region(&zone).unwrap();
                builder.add_receptor(&zone, "n", "iaf_psc_exp", false).unwrap();
                counts.insert(format!("{}_n", zone), *count);
            }
            let model = builder.build().unwrap();

            let allocations = PopulationAllocator::new(budget)
                .with_floor(0)
                .allocate(&model, &counts)
                .unwrap();

            let sum: u64 = allocations.values().sum();
            prop_assert!(sum <= budget);
        }
    }
}
