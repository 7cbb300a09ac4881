//! Interactive command controller
//!
//! Drives one "generate nozzle" command through its lifecycle: the host
//! creates it, the user edits inputs and previews, then the command either
//! executes (committing the sketch) or is destroyed.

use std::fmt;

use nozzle_cad::{SketchSurface, UnitsManager};
use thiserror::Error;

use crate::constants::DEFAULT_PRESET_NAME;
use crate::error::NozzleError;
use crate::generator::{GenerationReport, SketchGenerator};
use crate::parameters::{NozzleParameters, ParameterField};
use crate::presets::PresetRegistry;

/// Lifecycle state of a [`NozzleCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Idle,
    Configuring,
    Executing,
    Destroyed,
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandState::Idle => "idle",
            CommandState::Configuring => "configuring",
            CommandState::Executing => "executing",
            CommandState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// A change to one of the command's inputs
#[derive(Debug, Clone, PartialEq)]
pub enum CommandInput {
    /// A preset was picked; every dimension input is overwritten
    Preset(String),
    /// One dimension was edited, in millimeters (degrees for the angle)
    Dimension(ParameterField, f64),
}

/// Errors raised by the command controller
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: CommandState,
    },

    #[error(transparent)]
    Nozzle(#[from] NozzleError),
}

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Controller for a single nozzle command
#[derive(Debug, Clone)]
pub struct NozzleCommand {
    state: CommandState,
    registry: PresetRegistry,
    generator: SketchGenerator,
    inputs: NozzleParameters,
}

impl NozzleCommand {
    /// Create a new idle command.
    ///
    /// Inputs start out as the registry's `default` preset, or the built-in
    /// one when the registry does not have it.
    pub fn new(registry: PresetRegistry, generator: SketchGenerator) -> Self {
        let inputs = registry
            .preset_by_name(DEFAULT_PRESET_NAME)
            .unwrap_or_else(|_| crate::presets::default_nozzle());
        Self {
            state: CommandState::Idle,
            registry,
            generator,
            inputs,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Get the current inputs
    pub fn inputs(&self) -> &NozzleParameters {
        &self.inputs
    }

    /// Open the command and fill inputs from the default preset
    pub fn create(&mut self) -> CommandResult<()> {
        self.require("create", CommandState::Idle)?;
        if let Ok(preset) = self.registry.preset_by_name(DEFAULT_PRESET_NAME) {
            self.inputs = preset;
        }
        self.state = CommandState::Configuring;
        tracing::debug!("Nozzle command created with '{}'", self.inputs.name);
        Ok(())
    }

    /// Apply an input change
    pub fn input_changed(&mut self, input: CommandInput) -> CommandResult<()> {
        self.require("change inputs", CommandState::Configuring)?;
        match input {
            CommandInput::Preset(name) => {
                self.inputs = self.registry.preset_by_name(&name)?;
                tracing::debug!("Applied preset '{}'", name);
            }
            CommandInput::Dimension(field, value) => {
                self.inputs = self.inputs.with(field, value);
            }
        }
        Ok(())
    }

    /// Draw the current inputs without leaving the configuring state
    pub fn preview(
        &self,
        surface: &mut dyn SketchSurface,
        units: &dyn UnitsManager,
    ) -> CommandResult<GenerationReport> {
        self.require("preview", CommandState::Configuring)?;
        Ok(self.generator.generate(&self.inputs, surface, units)?)
    }

    /// Draw the current inputs and finish the command.
    ///
    /// On failure the command returns to configuring so the user can fix
    /// the inputs.
    pub fn execute(
        &mut self,
        surface: &mut dyn SketchSurface,
        units: &dyn UnitsManager,
    ) -> CommandResult<GenerationReport> {
        self.require("execute", CommandState::Configuring)?;
        self.state = CommandState::Executing;
        match self.generator.generate(&self.inputs, surface, units) {
            Ok(report) => {
                self.state = CommandState::Destroyed;
                Ok(report)
            }
            Err(e) => {
                self.state = CommandState::Configuring;
                Err(e.into())
            }
        }
    }

    /// Tear the command down. Allowed from any state.
    pub fn destroy(&mut self) {
        if self.state != CommandState::Destroyed {
            tracing::debug!("Nozzle command destroyed while {}", self.state);
        }
        self.state = CommandState::Destroyed;
    }

    fn require(&self, operation: &'static str, expected: CommandState) -> CommandResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CommandError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

impl Default for NozzleCommand {
    fn default() -> Self {
        Self::new(PresetRegistry::builtin(), SketchGenerator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::default_nozzle;
    use nozzle_cad::{FixedUnits, NullSurface, Sketch, SurfaceError};

    fn configuring() -> NozzleCommand {
        let mut command = NozzleCommand::default();
        command.create().unwrap();
        command
    }

    #[test]
    fn test_create_fills_default_preset() {
        let mut command = NozzleCommand::default();
        assert_eq!(command.state(), CommandState::Idle);

        command.create().unwrap();
        assert_eq!(command.state(), CommandState::Configuring);
        assert_eq!(command.inputs(), &default_nozzle());
    }

    #[test]
    fn test_create_twice_fails() {
        let mut command = configuring();
        let err = command.create().unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidState {
                state: CommandState::Configuring,
                ..
            }
        ));
    }

    #[test]
    fn test_dimension_input() {
        let mut command = configuring();
        command
            .input_changed(CommandInput::Dimension(ParameterField::ExitRadius, 2.0))
            .unwrap();
        assert_eq!(command.inputs().exit_radius, 2.0);
        assert_eq!(command.inputs().throat_radius, default_nozzle().throat_radius);
    }

    #[test]
    fn test_preset_overwrites_every_dimension() {
        let mut registry = PresetRegistry::builtin();
        let mut short = default_nozzle();
        short.name = "short".to_string();
        short.chamber_length = 40.0;
        short.chamber_cylinder_length = 30.0;
        registry.insert(short.clone());

        let mut command = NozzleCommand::new(registry, SketchGenerator::default());
        command.create().unwrap();
        command
            .input_changed(CommandInput::Dimension(ParameterField::DivergenceRadius, 5.0))
            .unwrap();
        command
            .input_changed(CommandInput::Preset("short".to_string()))
            .unwrap();

        assert_eq!(command.inputs(), &short);
    }

    #[test]
    fn test_unknown_preset_input() {
        let mut command = configuring();
        let err = command
            .input_changed(CommandInput::Preset("nonexistent".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Nozzle(NozzleError::UnknownPreset(_))
        ));
        assert_eq!(command.inputs(), &default_nozzle());
    }

    #[test]
    fn test_preview_keeps_configuring() {
        let command = configuring();
        let mut sketch = Sketch::new("preview");
        let report = command.preview(&mut sketch, &FixedUnits::default()).unwrap();

        assert_eq!(report.profiles.len(), 4);
        assert_eq!(command.state(), CommandState::Configuring);
    }

    #[test]
    fn test_execute_finishes_command() {
        let mut command = configuring();
        let mut sketch = Sketch::new("nozzle");
        command.execute(&mut sketch, &FixedUnits::default()).unwrap();

        assert_eq!(command.state(), CommandState::Destroyed);
        assert_eq!(sketch.constraint_count(), 60);
    }

    #[test]
    fn test_failed_execute_returns_to_configuring() {
        let mut command = configuring();
        let err = command
            .execute(&mut NullSurface, &FixedUnits::default())
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Nozzle(NozzleError::Surface(SurfaceError::SurfaceNotAvailable(_)))
        ));
        assert_eq!(command.state(), CommandState::Configuring);
    }

    #[test]
    fn test_invalid_inputs_block_execute() {
        let mut command = configuring();
        command
            .input_changed(CommandInput::Dimension(ParameterField::ThroatRadius, -1.0))
            .unwrap();
        let mut sketch = Sketch::new("nozzle");

        let err = command
            .execute(&mut sketch, &FixedUnits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Nozzle(NozzleError::InvalidParameters(_))
        ));
        assert_eq!(sketch.entity_count(), 1);
        assert_eq!(command.state(), CommandState::Configuring);
    }

    #[test]
    fn test_destroy_from_any_state() {
        let mut idle = NozzleCommand::default();
        idle.destroy();
        assert_eq!(idle.state(), CommandState::Destroyed);

        let mut command = configuring();
        command.destroy();
        command.destroy();
        assert_eq!(command.state(), CommandState::Destroyed);

        let err = command
            .preview(&mut Sketch::new("late"), &FixedUnits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidState {
                operation: "preview",
                state: CommandState::Destroyed
            }
        ));
    }

    #[test]
    fn test_input_before_create_fails() {
        let mut command = NozzleCommand::default();
        let result = command.input_changed(CommandInput::Dimension(ParameterField::ExitLength, 10.0));
        assert!(matches!(result, Err(CommandError::InvalidState { .. })));
    }
}
