//! Global constants for nozzle-core

/// Name of the built-in preset selected when nothing else is chosen
pub const DEFAULT_PRESET_NAME: &str = "default";

/// Inner wall thickness in millimeters
pub const INNER_WALL_THICKNESS_MM: f64 = 0.3;

/// Cooling channel thickness in millimeters
pub const CHANNEL_THICKNESS_MM: f64 = 1.0;

/// Outer wall thickness in millimeters
pub const OUTER_WALL_THICKNESS_MM: f64 = 1.0;

/// Perpendicular offset of distance dimension labels, in internal units
pub const DIMENSION_LABEL_OFFSET: f64 = -0.05;

/// Length of the vertical helper line anchoring the convergence angle, in internal units
pub const HELPER_LINE_LENGTH: f64 = 0.5;
