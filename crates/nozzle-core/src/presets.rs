//! Named nozzle presets

use crate::constants::DEFAULT_PRESET_NAME;
use crate::error::{NozzleError, NozzleResult};
use crate::parameters::NozzleParameters;

/// The built-in `default` preset
pub fn default_nozzle() -> NozzleParameters {
    NozzleParameters {
        name: DEFAULT_PRESET_NAME.to_string(),
        chamber_length: 67.23,
        chamber_cylinder_length: 56.23,
        exit_length: 11.59,
        chamber_radius: 10.48 / 2.0,
        throat_radius: 2.62 / 2.0,
        exit_radius: 3.23 / 2.0,
        convergence_angle: 30.0,
        convergence_radius: 13.68,
        divergence_radius: 1.96,
    }
}

/// Ordered registry of named presets. Presets are identified by name.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: Vec<NozzleParameters>,
}

impl PresetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in presets
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(default_nozzle());
        registry
    }

    /// Add a preset, replacing any preset with the same name in place
    pub fn insert(&mut self, preset: NozzleParameters) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Preset names in registration order
    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    /// Look up a preset by name
    pub fn preset_by_name(&self, name: &str) -> NozzleResult<NozzleParameters> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| NozzleError::UnknownPreset(name.to_string()))
    }

    /// Check whether a preset exists
    pub fn contains(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name == name)
    }

    /// Iterate over all presets
    pub fn iter(&self) -> impl Iterator<Item = &NozzleParameters> {
        self.presets.iter()
    }

    /// Number of presets
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
