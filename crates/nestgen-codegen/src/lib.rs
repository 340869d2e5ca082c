// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
# nestgen Generation Pipeline

Turns a [`nestgen_model::GraphModel`] into executable NEST setup scripts:

- Count/weight resolution from named empirical data sources
- Proportional population allocation with a per-population floor
- Connection, stimulus-generator and instrumentation statement synthesis
- Reconciliation of persisted stimulus-generator parameters

## Architecture

```text
GraphModel ──► PropertyCountResolver ──► PopulationAllocator ──► data.py
           ──► WeightResolver ─────┐
           ──► GeneratorConfigStore├──► ConnectionScriptBuilder ──► neuromodulation.py
   SynapseRoutingTable ────────────┘
```

Execution is single-threaded and single-pass. Each artifact is assembled
fully in memory, then written in one step; a fatal error during assembly
leaves no partial output.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod allocation;
pub mod catalog;
pub mod connection_script;
pub mod generator_store;
pub mod pipeline;
pub mod population_script;
pub mod resolve;
pub mod templates;
pub mod types;

// Re-export commonly used types
pub use allocation::{AllocationMap, PopulationAllocator, DEFAULT_POPULATION_FLOOR};
pub use catalog::{DataCatalog, FsDataCatalog, MemoryCatalog};
pub use connection_script::ConnectionScriptBuilder;
pub use generator_store::{GeneratorConfig, GeneratorConfigStore, PersistOutcome};
pub use pipeline::{
    GenerationConfig, GenerationReport, ScriptGenerator, DATA_FILE_NAME, NEUROMODULATION_FILE_NAME,
};
pub use population_script::PopulationScriptBuilder;
pub use resolve::{PropertyCountResolver, WeightResolver};
pub use templates::{BuiltinTemplates, FsTemplateLoader, TemplateLoader};
pub use types::{GenError, GenResult, PropertyCountMap, WeightMap};
