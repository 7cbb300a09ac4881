//! Nozzle parameters
//!
//! The immutable dimension record a profile is generated from. Lengths are
//! in millimeters and the convergence angle is in degrees until
//! [`NozzleParameters::to_units`] converts them for a host.

use std::fmt;
use std::path::Path;

use nozzle_cad::UnitsManager;
use serde::{Deserialize, Serialize};

use crate::error::{FileError, NozzleError, NozzleResult};
use crate::geometry::exit_angle_degrees;
use crate::persist;

/// Dimensions of a nozzle profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NozzleParameters {
    /// Preset or user-facing name
    pub name: String,
    /// Axial length from the throat to the injector face
    pub chamber_length: f64,
    /// Length of the straight cylindrical part of the chamber
    pub chamber_cylinder_length: f64,
    /// Axial length from the exit plane to the throat
    pub exit_length: f64,
    /// Chamber radius
    pub chamber_radius: f64,
    /// Throat radius
    pub throat_radius: f64,
    /// Exit radius
    pub exit_radius: f64,
    /// Converging half-angle in degrees
    pub convergence_angle: f64,
    /// Radius of the fillet between chamber and converging line
    pub convergence_radius: f64,
    /// Radius of the fillet downstream of the throat
    pub divergence_radius: f64,
}

/// One editable dimension of [`NozzleParameters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    ChamberLength,
    ChamberCylinderLength,
    ExitLength,
    ChamberRadius,
    ThroatRadius,
    ExitRadius,
    ConvergenceAngle,
    ConvergenceRadius,
    DivergenceRadius,
}

impl ParameterField {
    /// Get all fields in display order
    pub fn all() -> [ParameterField; 9] {
        [
            ParameterField::ChamberLength,
            ParameterField::ChamberCylinderLength,
            ParameterField::ExitLength,
            ParameterField::ChamberRadius,
            ParameterField::ThroatRadius,
            ParameterField::ExitRadius,
            ParameterField::ConvergenceAngle,
            ParameterField::ConvergenceRadius,
            ParameterField::DivergenceRadius,
        ]
    }

    /// Field name as used in parameter files
    pub fn key(&self) -> &'static str {
        match self {
            ParameterField::ChamberLength => "chamber_length",
            ParameterField::ChamberCylinderLength => "chamber_cylinder_length",
            ParameterField::ExitLength => "exit_length",
            ParameterField::ChamberRadius => "chamber_radius",
            ParameterField::ThroatRadius => "throat_radius",
            ParameterField::ExitRadius => "exit_radius",
            ParameterField::ConvergenceAngle => "convergence_angle",
            ParameterField::ConvergenceRadius => "convergence_radius",
            ParameterField::DivergenceRadius => "divergence_radius",
        }
    }

    /// Unit symbol the field is entered in
    pub fn unit(&self) -> &'static str {
        match self {
            ParameterField::ConvergenceAngle => "deg",
            _ => "mm",
        }
    }

    /// Whether the field is a length (converted between units)
    pub fn is_length(&self) -> bool {
        !matches!(self, ParameterField::ConvergenceAngle)
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl NozzleParameters {
    /// Read a single field
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::ChamberLength => self.chamber_length,
            ParameterField::ChamberCylinderLength => self.chamber_cylinder_length,
            ParameterField::ExitLength => self.exit_length,
            ParameterField::ChamberRadius => self.chamber_radius,
            ParameterField::ThroatRadius => self.throat_radius,
            ParameterField::ExitRadius => self.exit_radius,
            ParameterField::ConvergenceAngle => self.convergence_angle,
            ParameterField::ConvergenceRadius => self.convergence_radius,
            ParameterField::DivergenceRadius => self.divergence_radius,
        }
    }

    /// Copy with one field replaced
    pub fn with(&self, field: ParameterField, value: f64) -> Self {
        let mut params = self.clone();
        let slot = match field {
            ParameterField::ChamberLength => &mut params.chamber_length,
            ParameterField::ChamberCylinderLength => &mut params.chamber_cylinder_length,
            ParameterField::ExitLength => &mut params.exit_length,
            ParameterField::ChamberRadius => &mut params.chamber_radius,
            ParameterField::ThroatRadius => &mut params.throat_radius,
            ParameterField::ExitRadius => &mut params.exit_radius,
            ParameterField::ConvergenceAngle => &mut params.convergence_angle,
            ParameterField::ConvergenceRadius => &mut params.convergence_radius,
            ParameterField::DivergenceRadius => &mut params.divergence_radius,
        };
        *slot = value;
        params
    }

    /// Check the invariants a profile needs to be drawable
    pub fn validate(&self) -> NozzleResult<()> {
        for field in ParameterField::all() {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(invalid(format!("{field} must be finite, got {value}")));
            }
            if value <= 0.0 {
                return Err(invalid(format!("{field} must be positive, got {value}")));
            }
        }
        if self.chamber_cylinder_length >= self.chamber_length {
            return Err(invalid(format!(
                "chamber_cylinder_length ({}) must be shorter than chamber_length ({})",
                self.chamber_cylinder_length, self.chamber_length
            )));
        }
        if self.chamber_radius <= self.throat_radius {
            return Err(invalid(format!(
                "chamber_radius ({}) must be larger than throat_radius ({})",
                self.chamber_radius, self.throat_radius
            )));
        }
        if self.exit_radius < self.throat_radius {
            return Err(invalid(format!(
                "exit_radius ({}) must not be smaller than throat_radius ({})",
                self.exit_radius, self.throat_radius
            )));
        }
        if self.convergence_angle >= 90.0 {
            return Err(invalid(format!(
                "convergence_angle must be below 90 degrees, got {}",
                self.convergence_angle
            )));
        }
        Ok(())
    }

    /// Angle between the exit line and the throat radius line, in degrees
    pub fn exit_angle(&self) -> f64 {
        exit_angle_degrees(self.exit_length, self.exit_radius - self.throat_radius)
    }

    /// Overall axial length of chamber plus exit
    pub fn nozzle_length(&self) -> f64 {
        self.chamber_length + self.exit_length
    }

    /// Copy with chamber, throat and exit radii grown by `offset`
    pub fn with_radius_offset(&self, offset: f64) -> Self {
        Self {
            chamber_radius: self.chamber_radius + offset,
            throat_radius: self.throat_radius + offset,
            exit_radius: self.exit_radius + offset,
            ..self.clone()
        }
    }

    /// Copy with every length converted from millimeters to the host's internal unit
    pub fn to_units(&self, units: &dyn UnitsManager) -> Self {
        ParameterField::all()
            .into_iter()
            .filter(ParameterField::is_length)
            .fold(self.clone(), |params, field| {
                let value = units.from_millimeters(params.get(field));
                params.with(field, value)
            })
    }

    // ============== Persistence ==============

    /// Save parameters to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        persist::save(self, path.as_ref())
    }

    /// Load parameters from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FileError> {
        persist::load(path.as_ref())
    }

    /// Serialize parameters to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, FileError> {
        persist::to_bytes(self)
    }

    /// Parse parameters from RON bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, FileError> {
        persist::from_bytes(data)
    }
}

fn invalid(message: String) -> NozzleError {
    NozzleError::InvalidParameters(message)
}
