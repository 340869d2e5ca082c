// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
# nestgen Graph Model

Declarative model of a simulated nervous system for NEST script generation:

- Brain regions ("zones") holding ordered receptor populations
- Directed, synapse-typed connectivity between receptors
- Synapse-type routing (plain weighted links vs. custom connection models)
- Naming scheme shared by every generated statement

## Architecture

This crate holds the **model** (what the nervous system looks like); the
actual script synthesis lives in `nestgen-codegen`.

```text
nestgen-model (structure)      nestgen-codegen (synthesis)
─────────────────────────      ───────────────────────────
│ GraphModel           │   →   │ Count/weight resolution │
│ SynapseRoutingTable  │       │ Population allocation   │
│ Naming scheme        │       │ Script emission         │
└──────────────────────┘       └─────────────────────────┘
```

Models are built once through [`GraphModelBuilder`], validated on build, and
read-only afterwards. Region order and per-region receptor order are
significant: they fix the ordering of every generated statement and the
0-based population indices.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod model;
pub mod naming;
pub mod routing;
pub mod types;

// Re-export commonly used types
pub use model::{BrainRegion, GraphModel, GraphModelBuilder, Receptor};
pub use naming::{population_handle, population_key, size_var_name, weight_key};
pub use routing::SynapseRoutingTable;
pub use types::{ModelError, ModelResult};
