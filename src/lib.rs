//! # nestgen - NEST Setup-Script Generator
//!
//! Converts a declarative graph model of a simulated nervous system — brain
//! regions composed of receptor populations connected by typed synapses —
//! into executable NEST setup scripts: population sizing, connectivity
//! wiring, stimulus-generator attachment and recording-instrument
//! attachment.
//!
//! ## Quick Start
//!
//! ```rust
//! use nestgen::{
//!     GenerationConfig, GraphModel, MemoryCatalog, BuiltinTemplates, ScriptGenerator,
//!     SynapseRoutingTable,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = GraphModel::builder();
//! builder.add_region("visual")?;
//! builder.add_receptor("visual", "exc", "iaf_psc_exp", true)?;
//! builder.add_region("motor")?;
//! builder.add_receptor("motor", "exc", "iaf_psc_exp", false)?;
//! builder.connect("visual_exc", "Glu", "motor_exc");
//! let model = builder.build()?;
//!
//! let mut routing = SynapseRoutingTable::new();
//! routing.add("Glu");
//!
//! let catalog = MemoryCatalog::new()
//!     .with_count("visual_exc", 100)
//!     .with_count("motor_exc", 100)
//!     .with_weight("visual_exc-motor_exc", 1.5);
//!
//! let out = tempfile::tempdir()?;
//! let config = GenerationConfig::new(
//!     200,
//!     out.path().join("scripts"),
//!     out.path().join("generator_config.json"),
//! );
//! let report =
//!     ScriptGenerator::new(&model, &routing, &catalog, &BuiltinTemplates, config).run()?;
//! assert!(report.data_script.exists());
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! - [`nestgen_model`]: the graph model (regions, receptors, routing table)
//! - [`nestgen_codegen`]: resolvers, allocation, script synthesis, the
//!   persisted generator-config store and the pipeline orchestrator
//!
//! Generated output is deterministic: every iteration follows declaration
//! order, so identical inputs produce byte-identical scripts.

pub use nestgen_codegen::{
    AllocationMap, BuiltinTemplates, ConnectionScriptBuilder, DataCatalog, FsDataCatalog,
    FsTemplateLoader, GenError, GenResult, GenerationConfig, GenerationReport, GeneratorConfig,
    GeneratorConfigStore, MemoryCatalog, PersistOutcome, PopulationAllocator,
    PopulationScriptBuilder, PropertyCountMap, PropertyCountResolver, ScriptGenerator,
    TemplateLoader, WeightMap, WeightResolver, DATA_FILE_NAME, DEFAULT_POPULATION_FLOOR,
    NEUROMODULATION_FILE_NAME,
};
pub use nestgen_model::{
    population_handle, population_key, size_var_name, weight_key, BrainRegion, GraphModel,
    GraphModelBuilder, ModelError, ModelResult, Receptor, SynapseRoutingTable,
};
