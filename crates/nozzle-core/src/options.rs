//! Generator configuration
//!
//! Settings that shape a generated sketch without being part of the nozzle
//! itself. They can be serialized and loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CHANNEL_THICKNESS_MM, DIMENSION_LABEL_OFFSET, HELPER_LINE_LENGTH, INNER_WALL_THICKNESS_MM,
    OUTER_WALL_THICKNESS_MM,
};
use crate::error::{FileError, NozzleError, NozzleResult};
use crate::persist;

/// Thicknesses of the concentric wall layers, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallLayers {
    /// Inner (hot) wall
    pub inner_wall: f64,
    /// Cooling channel
    pub channel: f64,
    /// Outer wall
    pub outer_wall: f64,
}

impl Default for WallLayers {
    fn default() -> Self {
        Self {
            inner_wall: INNER_WALL_THICKNESS_MM,
            channel: CHANNEL_THICKNESS_MM,
            outer_wall: OUTER_WALL_THICKNESS_MM,
        }
    }
}

impl WallLayers {
    /// Radial offsets of the four profile boundaries, innermost first
    pub fn offsets(&self) -> [f64; 4] {
        let inner = self.inner_wall;
        let channel = inner + self.channel;
        [0.0, inner, channel, channel + self.outer_wall]
    }

    /// Total wall build-up
    pub fn total(&self) -> f64 {
        self.inner_wall + self.channel + self.outer_wall
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Wall layer thicknesses
    pub wall_layers: WallLayers,
    /// Perpendicular offset of distance labels, in internal units
    pub label_offset: f64,
    /// Length of the convergence angle helper line, in internal units
    pub helper_line_length: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            wall_layers: WallLayers::default(),
            label_offset: DIMENSION_LABEL_OFFSET,
            helper_line_length: HELPER_LINE_LENGTH,
        }
    }
}

impl GeneratorOptions {
    /// Check that every setting is usable
    pub fn validate(&self) -> NozzleResult<()> {
        let layers = [
            ("inner_wall", self.wall_layers.inner_wall),
            ("channel", self.wall_layers.channel),
            ("outer_wall", self.wall_layers.outer_wall),
        ];
        for (name, value) in layers {
            if !value.is_finite() || value < 0.0 {
                return Err(NozzleError::InvalidOptions(format!(
                    "{name} thickness must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.label_offset.is_finite() {
            return Err(NozzleError::InvalidOptions(format!(
                "label_offset must be finite, got {}",
                self.label_offset
            )));
        }
        if !(self.helper_line_length.is_finite() && self.helper_line_length > 0.0) {
            return Err(NozzleError::InvalidOptions(format!(
                "helper_line_length must be positive, got {}",
                self.helper_line_length
            )));
        }
        Ok(())
    }

    /// Save options to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        persist::save(self, path.as_ref())
    }

    /// Load options from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FileError> {
        persist::load(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_offsets() {
        let offsets = WallLayers::default().offsets();
        let expected = [0.0, 0.3, 1.3, 2.3];
        for (offset, expected) in offsets.iter().zip(expected) {
            assert_relative_eq!(*offset, expected, epsilon = 1e-12);
        }
        assert_relative_eq!(WallLayers::default().total(), 2.3, epsilon = 1e-12);
    }

    #[test]
    fn test_default_is_valid() {
        GeneratorOptions::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_negative_layer() {
        let mut options = GeneratorOptions::default();
        options.wall_layers.channel = -1.0;
        let err = options.validate().unwrap_err();
        assert!(matches!(err, NozzleError::InvalidOptions(ref m) if m.contains("channel")));
    }

    #[test]
    fn test_rejects_zero_helper_line() {
        let options = GeneratorOptions {
            helper_line_length: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let options: GeneratorOptions = ron::from_str("(label_offset: 0.1)").unwrap();
        assert_eq!(options.label_offset, 0.1);
        assert_eq!(options.wall_layers, WallLayers::default());
        assert_eq!(options.helper_line_length, HELPER_LINE_LENGTH);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.ron");
        let mut options = GeneratorOptions::default();
        options.wall_layers.outer_wall = 2.5;

        options.save(&path).unwrap();
        assert_eq!(GeneratorOptions::load(&path).unwrap(), options);
    }
}
