//! Nozzle Generator Core
//!
//! This crate contains the nozzle-specific logic:
//! - NozzleParameters: the dimension record and its validation
//! - PresetRegistry: named built-in nozzles
//! - GeneratorOptions: wall layers and drawing settings
//! - SketchGenerator: draws the four offset profiles onto a sketch surface
//! - NozzleCommand: interactive command lifecycle

pub mod command;
pub mod constants;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod options;
pub mod parameters;
pub mod presets;

mod persist;

pub use command::{CommandError, CommandInput, CommandResult, CommandState, NozzleCommand};
pub use constants::*;
pub use error::{FileError, NozzleError, NozzleResult};
pub use generator::{GenerationReport, ProfileReport, SketchGenerator};
pub use geometry::{angular_label_position, distance_label_position, exit_angle_degrees};
pub use options::{GeneratorOptions, WallLayers};
pub use parameters::{NozzleParameters, ParameterField};
pub use presets::{PresetRegistry, default_nozzle};
