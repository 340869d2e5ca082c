// Copyright 2025 nestgen contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Naming scheme shared by the model and every generated statement.

All generated identifiers derive from the receptor identity key
`"{zone}_{kind}"`. The key doubles as the 0-based index variable emitted in
the population-definition script, which is what makes the runtime handle
`{zone}[{zone}_{kind}]` a valid expression in the generated Python.
*/

/// Receptor identity key, e.g. `visual_exc`
///
/// The join key into count maps, weight maps and the generator-config store.
pub fn population_key(zone: &str, kind: &str) -> String {
    format!("{}_{}", zone, kind)
}

/// Name of the emitted population-size variable, e.g. `visual_exc_NN`
pub fn size_var_name(key: &str) -> String {
    format!("{}_NN", key)
}

/// Runtime handle expression for a receptor population, e.g. `visual[visual_exc]`
///
/// Indexes the region's population table by the receptor's emitted index
/// variable.
pub fn population_handle(zone: &str, kind: &str) -> String {
    format!("{}[{}]", zone, population_key(zone, kind))
}

/// Weight-map key for a directed connection, e.g. `visual_exc-motor_inh`
pub fn weight_key(from_key: &str, to_key: &str) -> String {
    format!("{}-{}", from_key, to_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_key() {
        assert_eq!(population_key("visual", "exc"), "visual_exc");
    }

    #[test]
    fn test_size_var_name() {
        assert_eq!(size_var_name("visual_exc"), "visual_exc_NN");
    }

    #[test]
    fn test_population_handle() {
        assert_eq!(population_handle("visual", "exc"), "visual[visual_exc]");
    }

    #[test]
    fn test_weight_key() {
        assert_eq!(weight_key("visual_exc", "motor_inh"), "visual_exc-motor_inh");
    }
}
