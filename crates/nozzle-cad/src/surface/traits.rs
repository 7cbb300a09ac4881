//! Sketch surface trait definitions
//!
//! These traits define the drawing capabilities a host sketch must provide.
//! The generator only ever talks to a `dyn SketchSurface`, so the host CAD
//! document, the in-memory recording sketch and test doubles are
//! interchangeable.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Sweep of every arc drawn through [`SketchSurface::add_arc`], in degrees
pub const ARC_SWEEP_DEGREES: f64 = 45.0;

/// Handle to a point that exists on a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointHandle {
    /// Surface-assigned identifier
    pub id: Uuid,
    /// Position at the time the handle was issued
    pub position: DVec2,
}

impl PointHandle {
    /// Create a new point handle
    pub fn new(id: Uuid, position: DVec2) -> Self {
        Self { id, position }
    }
}

/// Whether a line is part of the profile or a reference only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineKind {
    /// Part of the manufacturable profile
    #[default]
    Normal,
    /// Reference-only geometry
    Construction,
}

/// Handle to a line that exists on a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHandle {
    /// Surface-assigned identifier
    pub id: Uuid,
    /// Start point
    pub start: PointHandle,
    /// End point
    pub end: PointHandle,
    /// Line kind
    pub kind: LineKind,
}

impl LineHandle {
    /// Whether this is a construction line
    pub fn is_construction(&self) -> bool {
        self.kind == LineKind::Construction
    }
}

/// Turn sense of a 45° arc, named after the quadrant it sweeps through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcOrientation {
    /// Center at -radius in x, sweep +45°
    Q1,
    /// Center at +radius in x, sweep +45°
    Q2,
    /// Center at +radius in x, sweep -45°
    Q3,
    /// Center at -radius in x, sweep -45°
    Q4,
}

impl ArcOrientation {
    /// Offset from the start point to the arc center
    pub fn center_offset(self, radius: f64) -> DVec2 {
        match self {
            ArcOrientation::Q1 | ArcOrientation::Q4 => DVec2::new(-radius, 0.0),
            ArcOrientation::Q2 | ArcOrientation::Q3 => DVec2::new(radius, 0.0),
        }
    }

    /// Signed sweep angle in radians
    pub fn sweep(self) -> f64 {
        match self {
            ArcOrientation::Q1 | ArcOrientation::Q2 => ARC_SWEEP_DEGREES.to_radians(),
            ArcOrientation::Q3 | ArcOrientation::Q4 => -ARC_SWEEP_DEGREES.to_radians(),
        }
    }

    /// Center of an arc of `radius` starting at `start`
    pub fn center_for(self, start: DVec2, radius: f64) -> DVec2 {
        start + self.center_offset(radius)
    }

    /// Free end of an arc of `radius` starting at `start`
    pub fn end_for(self, start: DVec2, radius: f64) -> DVec2 {
        let center = self.center_for(start, radius);
        center + DVec2::from_angle(self.sweep()).rotate(start - center)
    }

    /// Get all orientations
    pub fn all() -> [ArcOrientation; 4] {
        [
            ArcOrientation::Q1,
            ArcOrientation::Q2,
            ArcOrientation::Q3,
            ArcOrientation::Q4,
        ]
    }
}

/// Handle to an arc that exists on a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcHandle {
    /// Surface-assigned identifier
    pub id: Uuid,
    /// Point the arc was drawn from
    pub start: PointHandle,
    /// Arc center
    pub center: PointHandle,
    /// Free end of the arc
    pub end: PointHandle,
    /// Arc radius
    pub radius: f64,
    /// Signed sweep in radians
    pub sweep: f64,
}

/// A curve taking part in a tangency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveRef {
    /// A line
    Line(LineHandle),
    /// An arc
    Arc(ArcHandle),
}

impl CurveRef {
    /// Identifier of the referenced curve
    pub fn id(&self) -> Uuid {
        match self {
            CurveRef::Line(line) => line.id,
            CurveRef::Arc(arc) => arc.id,
        }
    }

    /// Whether the referenced curve is construction geometry
    pub fn is_construction(&self) -> bool {
        match self {
            CurveRef::Line(line) => line.is_construction(),
            CurveRef::Arc(_) => false,
        }
    }
}

impl From<LineHandle> for CurveRef {
    fn from(line: LineHandle) -> Self {
        CurveRef::Line(line)
    }
}

impl From<ArcHandle> for CurveRef {
    fn from(arc: ArcHandle) -> Self {
        CurveRef::Arc(arc)
    }
}

/// Error type for surface operations
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    #[error("Unknown sketch entity: {0}")]
    UnknownEntity(Uuid),

    #[error("Entity {0} is not a line")]
    NotALine(Uuid),

    #[error("Entity {0} is not a curve")]
    NotACurve(Uuid),

    #[error("Construction line {0} cannot take part in a tangency")]
    ConstructionTangent(Uuid),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Surface not available: {0}")]
    SurfaceNotAvailable(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Drawing capabilities of a host sketch.
///
/// Every call mutates the surface immediately. Implementations never roll
/// back on error; discarding a half-drawn sketch is up to the caller.
pub trait SketchSurface {
    /// Get the surface name
    fn name(&self) -> &str;

    /// The fixed sketch origin
    fn origin(&self) -> PointHandle;

    /// Add a free point
    fn add_point(&mut self, position: DVec2) -> SurfaceResult<PointHandle>;

    /// Add a line between two existing points
    fn add_line(
        &mut self,
        start: &PointHandle,
        end: &PointHandle,
        kind: LineKind,
    ) -> SurfaceResult<LineHandle>;

    /// Add a 45° arc starting at an existing point.
    ///
    /// The center and free end are created by the surface according to
    /// `orientation`.
    fn add_arc(
        &mut self,
        start: &PointHandle,
        radius: f64,
        orientation: ArcOrientation,
    ) -> SurfaceResult<ArcHandle>;

    /// Constrain a line to be vertical
    fn add_vertical(&mut self, line: &LineHandle) -> SurfaceResult<()>;

    /// Constrain a line to be horizontal
    fn add_horizontal(&mut self, line: &LineHandle) -> SurfaceResult<()>;

    /// Constrain two curves to be tangent
    fn add_tangent(&mut self, a: CurveRef, b: CurveRef) -> SurfaceResult<()>;

    /// Add a distance dimension between two points, labelled at `label`
    fn add_distance_dimension(
        &mut self,
        a: &PointHandle,
        b: &PointHandle,
        label: DVec2,
    ) -> SurfaceResult<()>;

    /// Add an angular dimension between two lines, labelled at `label`.
    ///
    /// With `angle_degrees` set, the dimension drives the angle to that
    /// value; otherwise it takes the current angle.
    fn add_angular_dimension(
        &mut self,
        a: &LineHandle,
        b: &LineHandle,
        label: DVec2,
        angle_degrees: Option<f64>,
    ) -> SurfaceResult<()>;
}

/// A surface that refuses every drawing call (used when no host sketch is active)
#[derive(Debug, Default)]
pub struct NullSurface;

impl NullSurface {
    fn unavailable<T>() -> SurfaceResult<T> {
        Err(SurfaceError::SurfaceNotAvailable(
            "No active sketch".into(),
        ))
    }
}

impl SketchSurface for NullSurface {
    fn name(&self) -> &str {
        "null"
    }

    fn origin(&self) -> PointHandle {
        PointHandle::new(Uuid::nil(), DVec2::ZERO)
    }

    fn add_point(&mut self, _position: DVec2) -> SurfaceResult<PointHandle> {
        Self::unavailable()
    }

    fn add_line(
        &mut self,
        _start: &PointHandle,
        _end: &PointHandle,
        _kind: LineKind,
    ) -> SurfaceResult<LineHandle> {
        Self::unavailable()
    }

    fn add_arc(
        &mut self,
        _start: &PointHandle,
        _radius: f64,
        _orientation: ArcOrientation,
    ) -> SurfaceResult<ArcHandle> {
        Self::unavailable()
    }

    fn add_vertical(&mut self, _line: &LineHandle) -> SurfaceResult<()> {
        Self::unavailable()
    }

    fn add_horizontal(&mut self, _line: &LineHandle) -> SurfaceResult<()> {
        Self::unavailable()
    }

    fn add_tangent(&mut self, _a: CurveRef, _b: CurveRef) -> SurfaceResult<()> {
        Self::unavailable()
    }

    fn add_distance_dimension(
        &mut self,
        _a: &PointHandle,
        _b: &PointHandle,
        _label: DVec2,
    ) -> SurfaceResult<()> {
        Self::unavailable()
    }

    fn add_angular_dimension(
        &mut self,
        _a: &LineHandle,
        _b: &LineHandle,
        _label: DVec2,
        _angle_degrees: Option<f64>,
    ) -> SurfaceResult<()> {
        Self::unavailable()
    }
}
