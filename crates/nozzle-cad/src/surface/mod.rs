//! Drawing surface abstraction
//!
//! A host sketch is reached only through [`SketchSurface`] and
//! [`UnitsManager`].

mod traits;
mod units;

pub use traits::{
    ARC_SWEEP_DEGREES, ArcHandle, ArcOrientation, CurveRef, LineHandle, LineKind, NullSurface,
    PointHandle, SketchSurface, SurfaceError, SurfaceResult,
};
pub use units::{FixedUnits, LengthUnit, UnitsManager, UnknownUnit};
