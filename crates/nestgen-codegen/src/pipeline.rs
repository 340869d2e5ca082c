// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
ScriptGenerator - single-pass orchestration of the generation pipeline.

Stages: resolve counts → allocate populations → assemble the population
artifact; resolve weights → reconcile generator configs → assemble the
connectivity artifact; write both artifacts; persist the store.

Both artifacts are fully assembled in memory before anything is written, so
a fatal error anywhere in assembly leaves no output behind. The only
non-fatal condition is the generator-store bootstrap write, reported through
the run report.

Collaborators are explicit constructor parameters; there is no runtime
container and no process-wide state.
*/

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use nestgen_model::{GraphModel, SynapseRoutingTable};

use crate::allocation::{PopulationAllocator, DEFAULT_POPULATION_FLOOR};
use crate::catalog::DataCatalog;
use crate::connection_script::ConnectionScriptBuilder;
use crate::generator_store::{GeneratorConfigStore, PersistOutcome};
use crate::population_script::PopulationScriptBuilder;
use crate::resolve::{PropertyCountResolver, WeightResolver};
use crate::templates::{
    render, TemplateLoader, PLACEHOLDER_CONNECTIONS, PLACEHOLDER_GENERATORS,
    PLACEHOLDER_INSTRUMENTS, PLACEHOLDER_POPULATIONS,
};
use crate::types::GenResult;

/// Logical name of the population-definition artifact and its template
pub const DATA_FILE_NAME: &str = "data.py";
/// Logical name of the connectivity artifact and its template
pub const NEUROMODULATION_FILE_NAME: &str = "neuromodulation.py";

/// Run parameters for one generation pass
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Target total neuron budget `T`
    pub total_neurons: u64,
    /// Minimum population size `F`
    pub population_floor: u64,
    /// Manual count override; when set, sources are not consulted
    pub count_override: Option<u64>,
    /// Directory receiving the generated scripts
    pub output_dir: PathBuf,
    /// Path of the persisted generator-config store
    pub store_path: PathBuf,
}

impl GenerationConfig {
    /// Configuration with the default floor and no count override
    pub fn new(
        total_neurons: u64,
        output_dir: impl Into<PathBuf>,
        store_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            total_neurons,
            population_floor: DEFAULT_POPULATION_FLOOR,
            count_override: None,
            output_dir: output_dir.into(),
            store_path: store_path.into(),
        }
    }

    /// Override the population floor
    pub fn with_floor(mut self, floor: u64) -> Self {
        self.population_floor = floor;
        self
    }

    /// Set a manual count override
    pub fn with_count_override(mut self, count: u64) -> Self {
        self.count_override = Some(count);
        self
    }
}

/// Outcome of a completed generation run
#[derive(Debug)]
pub struct GenerationReport {
    /// Written population-definition script
    pub data_script: PathBuf,
    /// Written connectivity script
    pub neuromodulation_script: PathBuf,
    /// Result of the generator-store bootstrap write
    pub persist_outcome: PersistOutcome,
    /// Receptor keys that received synthesized default generator configs
    pub synthesized_defaults: Vec<String>,
}

/// Orchestrates one generation run
#[derive(Debug)]
pub struct ScriptGenerator<'a, C: DataCatalog, T: TemplateLoader> {
    model: &'a GraphModel,
    routing: &'a SynapseRoutingTable,
    catalog: &'a C,
    templates: &'a T,
    config: GenerationConfig,
}

impl<'a, C: DataCatalog, T: TemplateLoader> ScriptGenerator<'a, C, T> {
    /// Wire a generator from its collaborators
    pub fn new(
        model: &'a GraphModel,
        routing: &'a SynapseRoutingTable,
        catalog: &'a C,
        templates: &'a T,
        config: GenerationConfig,
    ) -> Self {
        Self {
            model,
            routing,
            catalog,
            templates,
            config,
        }
    }

    /// Execute the pipeline and write both artifacts
    ///
    /// # Errors
    ///
    /// Any [`crate::types::GenError`] aborts the run before anything is
    /// written; a store write failure alone does not.
    pub fn run(&self) -> GenResult<GenerationReport> {
        info!(
            regions = self.model.regions().len(),
            receptors = self.model.receptor_count(),
            "starting script generation"
        );

        // Population-definition artifact
        let counts =
            PropertyCountResolver::new(self.catalog, self.config.count_override).resolve(self.model)?;
        let allocator = PopulationAllocator::new(self.config.total_neurons)
            .with_floor(self.config.population_floor);
        let allocations = allocator.allocate(self.model, &counts)?;
        let population_body = PopulationScriptBuilder::new(
            self.model,
            &allocations,
            self.config.total_neurons,
            self.config.population_floor,
        )
        .body()?;
        let data_template = self.templates.load(DATA_FILE_NAME)?;
        let data_text = render(&data_template, &[(PLACEHOLDER_POPULATIONS, &population_body)]);

        // Connectivity artifact
        let weights = WeightResolver::new(self.catalog).resolve(self.model)?;
        let mut store = GeneratorConfigStore::load(&self.config.store_path)?;
        let synthesized_defaults = store.reconcile(self.model);
        let builder = ConnectionScriptBuilder::new(self.model, self.routing, &weights, &store);
        let connections = builder.connections_body()?;
        let generators = builder.generators_body();
        let instruments = builder.instruments_body();
        let neuromodulation_template = self.templates.load(NEUROMODULATION_FILE_NAME)?;
        let neuromodulation_text = render(
            &neuromodulation_template,
            &[
                (PLACEHOLDER_CONNECTIONS, connections.as_str()),
                (PLACEHOLDER_GENERATORS, generators.as_str()),
                (PLACEHOLDER_INSTRUMENTS, instruments.as_str()),
            ],
        );

        // Both artifacts are complete; only now touch the filesystem
        fs::create_dir_all(&self.config.output_dir)?;
        let data_script = self.config.output_dir.join(DATA_FILE_NAME);
        let neuromodulation_script = self.config.output_dir.join(NEUROMODULATION_FILE_NAME);
        fs::write(&data_script, &data_text)?;
        fs::write(&neuromodulation_script, &neuromodulation_text)?;
        info!(
            data = %data_script.display(),
            neuromodulation = %neuromodulation_script.display(),
            "generated scripts written"
        );

        let persist_outcome = store.persist();
        if let PersistOutcome::Failed(detail) = &persist_outcome {
            warn!(%detail, "generator-config store was not persisted");
        }

        Ok(GenerationReport {
            data_script,
            neuromodulation_script,
            persist_outcome,
            synthesized_defaults,
        })
    }
}
