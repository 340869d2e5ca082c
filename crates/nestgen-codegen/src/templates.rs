// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Template loading and placeholder substitution.

Templates are keyed by logical artifact name (`data.py`,
`neuromodulation.py`) and carry named `{{placeholder}}` markers that the
pipeline replaces with the assembled bodies. Built-in templates cover the
common case; a filesystem loader serves site-specific ones.
*/

use std::fs;
use std::path::PathBuf;

use crate::types::{GenError, GenResult};

/// Placeholder for the population-definition body
pub const PLACEHOLDER_POPULATIONS: &str = "{{populations}}";
/// Placeholder for the connection statements
pub const PLACEHOLDER_CONNECTIONS: &str = "{{connections}}";
/// Placeholder for the stimulus-generator statements
pub const PLACEHOLDER_GENERATORS: &str = "{{generators}}";
/// Placeholder for the detector/multimeter statements
pub const PLACEHOLDER_INSTRUMENTS: &str = "{{instruments}}";

/// Built-in population-definition template
pub const DATA_TEMPLATE_DEFAULT: &str = "\
import nest

{{populations}}
";

/// Built-in connectivity template
pub const NEUROMODULATION_TEMPLATE_DEFAULT: &str = "\
import nest
from data import *
from connections import connect, connect_generator, connect_detector, connect_multimeter

k_IDs = 'IDs'

{{connections}}

{{generators}}

{{instruments}}
";

/// Loads a textual template by logical file name
pub trait TemplateLoader {
    /// Load the named template
    ///
    /// # Errors
    ///
    /// Returns [`GenError::TemplateMissing`] when no template carries the
    /// given name.
    fn load(&self, name: &str) -> GenResult<String>;
}

/// Serves the built-in templates
#[derive(Debug, Clone, Default)]
pub struct BuiltinTemplates;

impl TemplateLoader for BuiltinTemplates {
    fn load(&self, name: &str) -> GenResult<String> {
        match name {
            "data.py" => Ok(DATA_TEMPLATE_DEFAULT.to_string()),
            "neuromodulation.py" => Ok(NEUROMODULATION_TEMPLATE_DEFAULT.to_string()),
            other => Err(GenError::TemplateMissing(other.to_string())),
        }
    }
}

/// Loads templates from files under a directory
#[derive(Debug, Clone)]
pub struct FsTemplateLoader {
    dir: PathBuf,
}

impl FsTemplateLoader {
    /// Create a loader rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateLoader for FsTemplateLoader {
    fn load(&self, name: &str) -> GenResult<String> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(GenError::TemplateMissing(name.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Substitute named placeholders in a template
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (placeholder, body) in substitutions {
        out = out.replace(placeholder, body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_templates() {
        let loader = BuiltinTemplates;
        assert!(loader.load("data.py").unwrap().contains(PLACEHOLDER_POPULATIONS));
        let neuromodulation = loader.load("neuromodulation.py").unwrap();
        assert!(neuromodulation.contains(PLACEHOLDER_CONNECTIONS));
        assert!(neuromodulation.contains(PLACEHOLDER_GENERATORS));
        assert!(neuromodulation.contains(PLACEHOLDER_INSTRUMENTS));
        assert!(matches!(
            loader.load("other.py"),
            Err(GenError::TemplateMissing(_))
        ));
    }

    #[test]
    fn test_fs_loader() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("data.py"), "# custom\n{{populations}}\n").unwrap();

        let loader = FsTemplateLoader::new(dir.path());
        assert_eq!(loader.load("data.py").unwrap(), "# custom\n{{populations}}\n");
        assert!(matches!(
            loader.load("neuromodulation.py"),
            Err(GenError::TemplateMissing(_))
        ));
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = "a: {{x}}\nb: {{y}}\n";
        let rendered = render(template, &[("{{x}}", "1"), ("{{y}}", "2")]);
        assert_eq!(rendered, "a: 1\nb: 2\n");
    }
}
