//! Sketch Constraints
//!
//! Geometric and dimensional constraints recorded against sketch entities.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A constraint between sketch entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SketchConstraint {
    // ============== Geometric Constraints ==============
    /// A line is horizontal (parallel to X axis)
    Horizontal {
        /// Unique identifier
        id: Uuid,
        /// Line to constrain
        line: Uuid,
    },

    /// A line is vertical (parallel to Y axis)
    Vertical {
        /// Unique identifier
        id: Uuid,
        /// Line to constrain
        line: Uuid,
    },

    /// A curve is tangent to another curve
    Tangent {
        /// Unique identifier
        id: Uuid,
        /// First curve
        curve1: Uuid,
        /// Second curve
        curve2: Uuid,
    },

    // ============== Dimensional Constraints ==============
    /// Distance between two points
    Distance {
        /// Unique identifier
        id: Uuid,
        /// First point
        point1: Uuid,
        /// Second point
        point2: Uuid,
        /// Required distance
        value: f64,
        /// Where the dimension text sits
        label: DVec2,
    },

    /// Angle between two lines
    Angle {
        /// Unique identifier
        id: Uuid,
        /// First line
        line1: Uuid,
        /// Second line
        line2: Uuid,
        /// Angle in degrees
        value: f64,
        /// Where the dimension text sits
        label: DVec2,
    },
}

impl SketchConstraint {
    /// Get the unique ID of this constraint
    pub fn id(&self) -> Uuid {
        match self {
            SketchConstraint::Horizontal { id, .. } => *id,
            SketchConstraint::Vertical { id, .. } => *id,
            SketchConstraint::Tangent { id, .. } => *id,
            SketchConstraint::Distance { id, .. } => *id,
            SketchConstraint::Angle { id, .. } => *id,
        }
    }

    /// Get the type name of this constraint
    pub fn type_name(&self) -> &'static str {
        match self {
            SketchConstraint::Horizontal { .. } => "Horizontal",
            SketchConstraint::Vertical { .. } => "Vertical",
            SketchConstraint::Tangent { .. } => "Tangent",
            SketchConstraint::Distance { .. } => "Distance",
            SketchConstraint::Angle { .. } => "Angle",
        }
    }

    /// Get all entity IDs referenced by this constraint
    pub fn referenced_entities(&self) -> Vec<Uuid> {
        match self {
            SketchConstraint::Horizontal { line, .. } => vec![*line],
            SketchConstraint::Vertical { line, .. } => vec![*line],
            SketchConstraint::Tangent { curve1, curve2, .. } => vec![*curve1, *curve2],
            SketchConstraint::Distance { point1, point2, .. } => vec![*point1, *point2],
            SketchConstraint::Angle { line1, line2, .. } => vec![*line1, *line2],
        }
    }

    /// Get the dimensional value if this is a dimensional constraint
    pub fn value(&self) -> Option<f64> {
        match self {
            SketchConstraint::Distance { value, .. } => Some(*value),
            SketchConstraint::Angle { value, .. } => Some(*value),
            _ => None,
        }
    }

    // ============== Factory Methods ==============

    /// Create a horizontal constraint
    pub fn horizontal(line: Uuid) -> Self {
        SketchConstraint::Horizontal {
            id: Uuid::new_v4(),
            line,
        }
    }

    /// Create a vertical constraint
    pub fn vertical(line: Uuid) -> Self {
        SketchConstraint::Vertical {
            id: Uuid::new_v4(),
            line,
        }
    }

    /// Create a tangent constraint
    pub fn tangent(curve1: Uuid, curve2: Uuid) -> Self {
        SketchConstraint::Tangent {
            id: Uuid::new_v4(),
            curve1,
            curve2,
        }
    }

    /// Create a distance constraint
    pub fn distance(point1: Uuid, point2: Uuid, value: f64, label: DVec2) -> Self {
        SketchConstraint::Distance {
            id: Uuid::new_v4(),
            point1,
            point2,
            value,
            label,
        }
    }

    /// Create an angle constraint (value in degrees)
    pub fn angle(line1: Uuid, line2: Uuid, value: f64, label: DVec2) -> Self {
        SketchConstraint::Angle {
            id: Uuid::new_v4(),
            line1,
            line2,
            value,
            label,
        }
    }
}
