//! Sketch audit
//!
//! Structural checks over a recorded sketch: entity and constraint counts,
//! constraints that point at missing entities, and tangencies that involve
//! construction geometry.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::{Sketch, SketchConstraint, SketchEntity};

/// Summary of a recorded sketch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SketchAudit {
    /// Number of points, origin included
    pub points: usize,
    /// Number of real lines
    pub lines: usize,
    /// Number of construction lines
    pub construction_lines: usize,
    /// Number of arcs
    pub arcs: usize,
    /// Constraint count per constraint type
    pub constraints: BTreeMap<&'static str, usize>,
    /// Constraints referencing entities that do not exist
    pub dangling: Vec<Uuid>,
    /// Tangent constraints that involve a construction line
    pub construction_tangents: Vec<Uuid>,
}

impl SketchAudit {
    /// Audit a sketch
    pub fn of(sketch: &Sketch) -> Self {
        let mut audit = Self::default();

        for entity in sketch.entities_iter() {
            match entity {
                SketchEntity::Point { .. } => audit.points += 1,
                SketchEntity::Line {
                    construction: true, ..
                } => audit.construction_lines += 1,
                SketchEntity::Line { .. } => audit.lines += 1,
                SketchEntity::Arc { .. } => audit.arcs += 1,
            }
        }

        for constraint in sketch.constraints_iter() {
            *audit.constraints.entry(constraint.type_name()).or_default() += 1;

            if constraint
                .referenced_entities()
                .iter()
                .any(|id| sketch.get_entity(*id).is_none())
            {
                audit.dangling.push(constraint.id());
            }

            if let SketchConstraint::Tangent { curve1, curve2, .. } = constraint {
                let touches_construction = [curve1, curve2].into_iter().any(|id| {
                    sketch
                        .get_entity(*id)
                        .is_some_and(SketchEntity::is_construction)
                });
                if touches_construction {
                    audit.construction_tangents.push(constraint.id());
                }
            }
        }

        audit
    }

    /// Number of constraints of a given type name
    pub fn count_of(&self, type_name: &str) -> usize {
        self.constraints.get(type_name).copied().unwrap_or(0)
    }

    /// Total number of constraints
    pub fn total_constraints(&self) -> usize {
        self.constraints.values().sum()
    }

    /// Whether no structural problem was found
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.construction_tangents.is_empty()
    }
}
