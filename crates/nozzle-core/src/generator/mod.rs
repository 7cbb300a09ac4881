//! Nozzle profile sketch generator
//!
//! Turns a set of [`NozzleParameters`] into points, lines, arcs and
//! constraints on a [`SketchSurface`]. A run draws the two shared symmetry
//! axes once, then one profile per wall boundary (inner wall, channel and
//! outer wall), each with the chamber, throat and exit radii grown by the
//! boundary's radial offset.
//!
//! Parameters are validated before anything is drawn. Once drawing starts,
//! the first surface error aborts the run and whatever was already drawn
//! stays on the surface.

mod profile;

use nozzle_cad::{LengthUnit, SketchSurface, UnitsManager};
use serde::Serialize;

use crate::error::NozzleResult;
use crate::options::GeneratorOptions;
use crate::parameters::NozzleParameters;

use profile::ProfileBuilder;

/// Summary of one drawn profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    /// Radial offset of this profile, in millimeters
    pub offset_mm: f64,
    /// Exit angle in degrees
    pub exit_angle: f64,
    /// Chamber radius in internal units
    pub chamber_radius: f64,
    /// Throat radius in internal units
    pub throat_radius: f64,
    /// Exit radius in internal units
    pub exit_radius: f64,
}

/// Summary of a successful generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Unit the sketch was drawn in
    pub internal_units: LengthUnit,
    /// Chamber plus exit length, in internal units
    pub nozzle_length: f64,
    /// Profiles in drawing order, innermost first
    pub profiles: Vec<ProfileReport>,
}

/// Draws nozzle profiles onto sketch surfaces
#[derive(Debug, Clone, Default)]
pub struct SketchGenerator {
    options: GeneratorOptions,
}

impl SketchGenerator {
    /// Create a new generator
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Validate `params` and draw the full nozzle sketch on `surface`
    pub fn generate(
        &self,
        params: &NozzleParameters,
        surface: &mut dyn SketchSurface,
        units: &dyn UnitsManager,
    ) -> NozzleResult<GenerationReport> {
        if let Err(e) = params.validate().and_then(|_| self.options.validate()) {
            tracing::warn!("Rejected nozzle '{}': {}", params.name, e);
            return Err(e);
        }

        tracing::info!(
            nozzle = %params.name,
            surface = surface.name(),
            units = %units.internal_units(),
            "Generating nozzle sketch"
        );

        self.draw(params, surface, units).inspect_err(|e| {
            tracing::warn!("Nozzle sketch generation for '{}' failed: {}", params.name, e);
        })
    }

    fn draw(
        &self,
        params: &NozzleParameters,
        surface: &mut dyn SketchSurface,
        units: &dyn UnitsManager,
    ) -> NozzleResult<GenerationReport> {
        let base = params.to_units(units);
        let mut builder = ProfileBuilder::new(
            surface,
            self.options.label_offset,
            self.options.helper_line_length,
        );

        let axes = builder.draw_axes(&base)?;

        let mut profiles = Vec::with_capacity(4);
        for offset_mm in self.options.wall_layers.offsets() {
            let offset_params = base.with_radius_offset(units.from_millimeters(offset_mm));
            tracing::debug!(
                offset_mm,
                throat_radius = offset_params.throat_radius,
                "Drawing profile"
            );
            builder.draw_profile(&offset_params, &axes)?;

            profiles.push(ProfileReport {
                offset_mm,
                exit_angle: offset_params.exit_angle(),
                chamber_radius: offset_params.chamber_radius,
                throat_radius: offset_params.throat_radius,
                exit_radius: offset_params.exit_radius,
            });
        }

        Ok(GenerationReport {
            internal_units: units.internal_units(),
            nozzle_length: base.nozzle_length(),
            profiles,
        })
    }
}
