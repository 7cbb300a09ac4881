//! Sketch Surface Abstraction for the Nozzle Generator
//!
//! This crate provides:
//! - The drawing-surface and unit-conversion traits a host sketch implements
//! - Sketch constraints and an in-memory recording sketch
//! - A structural audit of recorded sketches
//! - DXF export of recorded profiles

pub mod export;
pub mod sketch;
pub mod surface;

// Re-exports for convenience
pub use export::{DxfDocument, DxfShape};
pub use sketch::{POINT_TOLERANCE, Sketch, SketchAudit, SketchConstraint, SketchEntity};
pub use surface::{
    ARC_SWEEP_DEGREES, ArcHandle, ArcOrientation, CurveRef, FixedUnits, LengthUnit, LineHandle,
    LineKind, NullSurface, PointHandle, SketchSurface, SurfaceError, SurfaceResult, UnitsManager,
    UnknownUnit,
};
