//! Recording sketch
//!
//! An in-memory [`SketchSurface`] that records every entity and constraint
//! in insertion order. It stands in for a host sketch when generating
//! headless, and is what gets serialized or exported.

mod audit;
mod constraint;

pub use audit::SketchAudit;
pub use constraint::SketchConstraint;

use std::collections::HashMap;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::surface::{
    ArcHandle, ArcOrientation, CurveRef, LineHandle, LineKind, PointHandle, SketchSurface,
    SurfaceError, SurfaceResult,
};

/// Points closer than this are treated as the same location
pub const POINT_TOLERANCE: f64 = 1e-9;

/// An entity in a sketch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SketchEntity {
    /// A point
    Point {
        /// Unique identifier
        id: Uuid,
        /// Position
        position: DVec2,
    },

    /// A straight line between two points
    Line {
        /// Unique identifier
        id: Uuid,
        /// Start point
        start: Uuid,
        /// End point
        end: Uuid,
        /// Reference-only geometry
        construction: bool,
    },

    /// A circular arc
    Arc {
        /// Unique identifier
        id: Uuid,
        /// Center point
        center: Uuid,
        /// Point the arc was drawn from
        start: Uuid,
        /// Free end
        end: Uuid,
        /// Radius
        radius: f64,
        /// Signed sweep in radians
        sweep: f64,
    },
}

impl SketchEntity {
    /// Get the unique ID of this entity
    pub fn id(&self) -> Uuid {
        match self {
            SketchEntity::Point { id, .. } => *id,
            SketchEntity::Line { id, .. } => *id,
            SketchEntity::Arc { id, .. } => *id,
        }
    }

    /// Get the type name of this entity
    pub fn type_name(&self) -> &'static str {
        match self {
            SketchEntity::Point { .. } => "Point",
            SketchEntity::Line { .. } => "Line",
            SketchEntity::Arc { .. } => "Arc",
        }
    }

    /// Position, if this is a point
    pub fn position(&self) -> Option<DVec2> {
        match self {
            SketchEntity::Point { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this is a construction line
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            SketchEntity::Line {
                construction: true,
                ..
            }
        )
    }

    /// Whether this is a line or an arc
    pub fn is_curve(&self) -> bool {
        matches!(self, SketchEntity::Line { .. } | SketchEntity::Arc { .. })
    }
}

/// Serialization format keeping entities in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SketchData {
    name: String,
    origin: Uuid,
    entities: Vec<SketchEntity>,
    constraints: Vec<SketchConstraint>,
}

/// A recorded 2D sketch
#[derive(Debug, Clone)]
pub struct Sketch {
    /// Sketch name
    pub name: String,
    origin: Uuid,
    /// Entities in insertion order
    entities: Vec<SketchEntity>,
    /// Entity ID to index in `entities`
    index: HashMap<Uuid, usize>,
    constraints: Vec<SketchConstraint>,
}

impl From<SketchData> for Sketch {
    fn from(data: SketchData) -> Self {
        let index = data
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();
        Self {
            name: data.name,
            origin: data.origin,
            entities: data.entities,
            index,
            constraints: data.constraints,
        }
    }
}

impl Serialize for Sketch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let data = SketchData {
            name: self.name.clone(),
            origin: self.origin,
            entities: self.entities.clone(),
            constraints: self.constraints.clone(),
        };
        data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sketch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = SketchData::deserialize(deserializer)?;
        Ok(Sketch::from(data))
    }
}

impl Default for Sketch {
    fn default() -> Self {
        Self::new("Sketch")
    }
}

impl Sketch {
    /// Create an empty sketch holding only the origin point
    pub fn new(name: impl Into<String>) -> Self {
        let origin = Uuid::new_v4();
        let mut sketch = Self {
            name: name.into(),
            origin,
            entities: Vec::new(),
            index: HashMap::new(),
            constraints: Vec::new(),
        };
        sketch.push_entity(SketchEntity::Point {
            id: origin,
            position: DVec2::ZERO,
        });
        sketch
    }

    // ============== Accessors ==============

    /// ID of the origin point
    pub fn origin_id(&self) -> Uuid {
        self.origin
    }

    /// Get an entity by ID
    pub fn get_entity(&self, id: Uuid) -> Option<&SketchEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    /// Iterate over entities in insertion order
    pub fn entities_iter(&self) -> impl Iterator<Item = &SketchEntity> {
        self.entities.iter()
    }

    /// Iterate over constraints in insertion order
    pub fn constraints_iter(&self) -> impl Iterator<Item = &SketchConstraint> {
        self.constraints.iter()
    }

    /// Number of entities, origin included
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Position of a point entity
    pub fn point_position(&self, id: Uuid) -> Option<DVec2> {
        self.get_entity(id).and_then(SketchEntity::position)
    }

    /// Start and end positions of a line entity
    pub fn line_endpoints(&self, id: Uuid) -> Option<(DVec2, DVec2)> {
        match self.get_entity(id)? {
            SketchEntity::Line { start, end, .. } => {
                Some((self.point_position(*start)?, self.point_position(*end)?))
            }
            _ => None,
        }
    }

    // ============== Mutation ==============

    /// Record a constraint after checking every referenced entity exists
    pub fn add_constraint(&mut self, constraint: SketchConstraint) -> SurfaceResult<Uuid> {
        if let Some(missing) = constraint
            .referenced_entities()
            .into_iter()
            .find(|id| !self.index.contains_key(id))
        {
            return Err(SurfaceError::UnknownEntity(missing));
        }
        let id = constraint.id();
        self.constraints.push(constraint);
        Ok(id)
    }

    fn push_entity(&mut self, entity: SketchEntity) -> Uuid {
        let id = entity.id();
        self.index.insert(id, self.entities.len());
        self.entities.push(entity);
        id
    }

    fn insert_point(&mut self, position: DVec2) -> PointHandle {
        let id = self.push_entity(SketchEntity::Point {
            id: Uuid::new_v4(),
            position,
        });
        PointHandle::new(id, position)
    }

    /// Resolve a handle against the stored point
    fn resolve_point(&self, handle: &PointHandle) -> SurfaceResult<PointHandle> {
        self.point_position(handle.id)
            .map(|position| PointHandle::new(handle.id, position))
            .ok_or(SurfaceError::UnknownEntity(handle.id))
    }

    fn require_line(&self, id: Uuid) -> SurfaceResult<(DVec2, DVec2)> {
        match self.get_entity(id) {
            None => Err(SurfaceError::UnknownEntity(id)),
            Some(SketchEntity::Line { .. }) => self
                .line_endpoints(id)
                .ok_or(SurfaceError::UnknownEntity(id)),
            Some(_) => Err(SurfaceError::NotALine(id)),
        }
    }

    fn require_tangent_curve(&self, curve: &CurveRef) -> SurfaceResult<()> {
        let id = curve.id();
        match self.get_entity(id) {
            None => Err(SurfaceError::UnknownEntity(id)),
            Some(entity) if !entity.is_curve() => Err(SurfaceError::NotACurve(id)),
            Some(entity) if entity.is_construction() => {
                Err(SurfaceError::ConstructionTangent(id))
            }
            Some(_) => Ok(()),
        }
    }

    // ============== Persistence ==============

    /// Serialize the sketch as pretty RON
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Parse a sketch from RON
    pub fn from_ron_str(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    /// Write the sketch to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = self
            .to_ron_string()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

impl SketchSurface for Sketch {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> PointHandle {
        PointHandle::new(self.origin, DVec2::ZERO)
    }

    fn add_point(&mut self, position: DVec2) -> SurfaceResult<PointHandle> {
        if !position.is_finite() {
            return Err(SurfaceError::InvalidGeometry(format!(
                "point position {position} is not finite"
            )));
        }
        Ok(self.insert_point(position))
    }

    fn add_line(
        &mut self,
        start: &PointHandle,
        end: &PointHandle,
        kind: LineKind,
    ) -> SurfaceResult<LineHandle> {
        let start = self.resolve_point(start)?;
        let end = self.resolve_point(end)?;
        if start.position.distance(end.position) < POINT_TOLERANCE {
            return Err(SurfaceError::InvalidGeometry(format!(
                "zero-length line at {}",
                start.position
            )));
        }

        let id = self.push_entity(SketchEntity::Line {
            id: Uuid::new_v4(),
            start: start.id,
            end: end.id,
            construction: kind == LineKind::Construction,
        });
        tracing::trace!(%id, ?kind, "line added");
        Ok(LineHandle {
            id,
            start,
            end,
            kind,
        })
    }

    fn add_arc(
        &mut self,
        start: &PointHandle,
        radius: f64,
        orientation: ArcOrientation,
    ) -> SurfaceResult<ArcHandle> {
        let start = self.resolve_point(start)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SurfaceError::InvalidGeometry(format!(
                "arc radius must be positive, got {radius}"
            )));
        }

        let center = self.insert_point(orientation.center_for(start.position, radius));
        let end = self.insert_point(orientation.end_for(start.position, radius));
        let sweep = orientation.sweep();
        let id = self.push_entity(SketchEntity::Arc {
            id: Uuid::new_v4(),
            center: center.id,
            start: start.id,
            end: end.id,
            radius,
            sweep,
        });
        tracing::trace!(%id, ?orientation, radius, "arc added");
        Ok(ArcHandle {
            id,
            start,
            center,
            end,
            radius,
            sweep,
        })
    }

    fn add_vertical(&mut self, line: &LineHandle) -> SurfaceResult<()> {
        self.require_line(line.id)?;
        self.add_constraint(SketchConstraint::vertical(line.id))?;
        Ok(())
    }

    fn add_horizontal(&mut self, line: &LineHandle) -> SurfaceResult<()> {
        self.require_line(line.id)?;
        self.add_constraint(SketchConstraint::horizontal(line.id))?;
        Ok(())
    }

    fn add_tangent(&mut self, a: CurveRef, b: CurveRef) -> SurfaceResult<()> {
        self.require_tangent_curve(&a)?;
        self.require_tangent_curve(&b)?;
        self.add_constraint(SketchConstraint::tangent(a.id(), b.id()))?;
        Ok(())
    }

    fn add_distance_dimension(
        &mut self,
        a: &PointHandle,
        b: &PointHandle,
        label: DVec2,
    ) -> SurfaceResult<()> {
        let a = self.resolve_point(a)?;
        let b = self.resolve_point(b)?;
        let value = a.position.distance(b.position);
        self.add_constraint(SketchConstraint::distance(a.id, b.id, value, label))?;
        Ok(())
    }

    fn add_angular_dimension(
        &mut self,
        a: &LineHandle,
        b: &LineHandle,
        label: DVec2,
        angle_degrees: Option<f64>,
    ) -> SurfaceResult<()> {
        let (a_start, a_end) = self.require_line(a.id)?;
        let (b_start, b_end) = self.require_line(b.id)?;
        let value = match angle_degrees {
            Some(angle) if angle.is_finite() => angle,
            Some(angle) => {
                return Err(SurfaceError::InvalidGeometry(format!(
                    "angular dimension value {angle} is not finite"
                )));
            }
            None => angle_between(a_end - a_start, b_end - b_start),
        };
        self.add_constraint(SketchConstraint::angle(a.id, b.id, value, label))?;
        Ok(())
    }
}

/// Unsigned angle between two directions, in degrees
fn angle_between(a: DVec2, b: DVec2) -> f64 {
    a.perp_dot(b).atan2(a.dot(b)).abs().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_sketch_has_origin() {
        let sketch = Sketch::new("test");
        assert_eq!(sketch.entity_count(), 1);
        assert_eq!(sketch.point_position(sketch.origin_id()), Some(DVec2::ZERO));
        assert_eq!(sketch.origin().id, sketch.origin_id());
    }

    #[test]
    fn test_line_and_distance_dimension() {
        let mut sketch = Sketch::new("test");
        let origin = sketch.origin();
        let end = sketch.add_point(DVec2::new(0.0, 11.59)).unwrap();
        let line = sketch.add_line(&origin, &end, LineKind::Construction).unwrap();
        sketch.add_vertical(&line).unwrap();
        sketch
            .add_distance_dimension(&line.start, &line.end, DVec2::new(-0.05, 5.795))
            .unwrap();

        let dimension = sketch.constraints_iter().last().unwrap();
        assert_relative_eq!(dimension.value().unwrap(), 11.59, epsilon = 1e-12);
        assert!(sketch.get_entity(line.id).unwrap().is_construction());
        assert_eq!(sketch.constraint_count(), 2);
    }

    #[test]
    fn test_zero_length_line_rejected() {
        let mut sketch = Sketch::new("test");
        let origin = sketch.origin();
        let result = sketch.add_line(&origin, &origin, LineKind::Normal);
        assert!(matches!(result, Err(SurfaceError::InvalidGeometry(_))));
    }

    #[test]
    fn test_unknown_point_rejected() {
        let mut sketch = Sketch::new("test");
        let origin = sketch.origin();
        let stray = PointHandle::new(Uuid::new_v4(), DVec2::new(1.0, 1.0));
        let result = sketch.add_line(&origin, &stray, LineKind::Normal);
        assert!(matches!(result, Err(SurfaceError::UnknownEntity(id)) if id == stray.id));
    }

    #[test]
    fn test_arc_creates_center_and_end() {
        let mut sketch = Sketch::new("test");
        let start = sketch.add_point(DVec2::new(5.0, 10.0)).unwrap();
        let arc = sketch.add_arc(&start, 2.0, ArcOrientation::Q4).unwrap();

        assert_eq!(arc.start.id, start.id);
        assert_eq!(arc.center.position, DVec2::new(3.0, 10.0));
        assert_relative_eq!(arc.end.position.distance(arc.center.position), 2.0, epsilon = 1e-12);
        // origin + start + center + end + arc
        assert_eq!(sketch.entity_count(), 5);
    }

    #[test]
    fn test_tangent_rejects_construction_line() {
        let mut sketch = Sketch::new("test");
        let origin = sketch.origin();
        let top = sketch.add_point(DVec2::new(0.0, 4.0)).unwrap();
        let axis = sketch.add_line(&origin, &top, LineKind::Construction).unwrap();
        let arc = sketch.add_arc(&top, 1.0, ArcOrientation::Q2).unwrap();

        let result = sketch.add_tangent(axis.into(), arc.into());
        assert!(matches!(result, Err(SurfaceError::ConstructionTangent(id)) if id == axis.id));
        assert_eq!(sketch.constraint_count(), 0);
    }

    #[test]
    fn test_vertical_rejects_arc() {
        let mut sketch = Sketch::new("test");
        let start = sketch.add_point(DVec2::new(1.0, 1.0)).unwrap();
        let arc = sketch.add_arc(&start, 1.0, ArcOrientation::Q1).unwrap();
        let fake_line = LineHandle {
            id: arc.id,
            start: arc.start,
            end: arc.end,
            kind: LineKind::Normal,
        };
        let result = sketch.add_vertical(&fake_line);
        assert!(matches!(result, Err(SurfaceError::NotALine(_))));
    }

    #[test]
    fn test_angular_dimension_measures_when_not_driven() {
        let mut sketch = Sketch::new("test");
        let origin = sketch.origin();
        let right = sketch.add_point(DVec2::new(1.0, 0.0)).unwrap();
        let up = sketch.add_point(DVec2::new(0.0, 1.0)).unwrap();
        let a = sketch.add_line(&origin, &right, LineKind::Normal).unwrap();
        let b = sketch.add_line(&origin, &up, LineKind::Normal).unwrap();

        sketch.add_angular_dimension(&a, &b, DVec2::ZERO, None).unwrap();
        sketch
            .add_angular_dimension(&a, &b, DVec2::ZERO, Some(-30.0))
            .unwrap();

        let values: Vec<f64> = sketch.constraints_iter().filter_map(|c| c.value()).collect();
        assert_relative_eq!(values[0], 90.0, epsilon = 1e-9);
        assert_eq!(values[1], -30.0);
    }

    #[test]
    fn test_ron_round_trip_keeps_order() {
        let mut sketch = Sketch::new("round trip");
        let origin = sketch.origin();
        let p = sketch.add_point(DVec2::new(2.0, 3.0)).unwrap();
        let line = sketch.add_line(&origin, &p, LineKind::Normal).unwrap();
        sketch.add_horizontal(&line).unwrap();

        let content = sketch.to_ron_string().unwrap();
        let loaded = Sketch::from_ron_str(&content).unwrap();

        assert_eq!(loaded.name, "round trip");
        assert_eq!(loaded.origin_id(), sketch.origin_id());
        let ids: Vec<Uuid> = loaded.entities_iter().map(SketchEntity::id).collect();
        let expected: Vec<Uuid> = sketch.entities_iter().map(SketchEntity::id).collect();
        assert_eq!(ids, expected);
        assert_eq!(loaded.line_endpoints(line.id), Some((DVec2::ZERO, DVec2::new(2.0, 3.0))));
        assert_eq!(loaded.constraint_count(), 1);
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.ron");
        Sketch::new("saved").save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded = Sketch::from_ron_str(&content).unwrap();
        assert_eq!(loaded.name, "saved");
    }
}
