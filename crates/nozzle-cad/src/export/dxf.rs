//! DXF export for recorded nozzle sketches.
//!
//! Writes DXF R12 with two layers:
//! - real profile geometry on layer `PROFILE`
//! - construction lines on layer `CONSTRUCTION`
//!
//! Dimensions and constraints are not exported.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::DVec2;

use crate::sketch::{Sketch, SketchEntity};

/// Layer for real profile geometry
pub const PROFILE_LAYER: &str = "PROFILE";
/// Layer for construction geometry
pub const CONSTRUCTION_LAYER: &str = "CONSTRUCTION";

/// A 2D shape for DXF export.
#[derive(Debug, Clone, PartialEq)]
pub enum DxfShape {
    /// Line segment.
    Line {
        /// Start point.
        start: DVec2,
        /// End point.
        end: DVec2,
        /// DXF layer name.
        layer: &'static str,
    },
    /// Counter-clockwise circular arc.
    Arc {
        /// Arc center.
        center: DVec2,
        /// Arc radius.
        radius: f64,
        /// Start angle in degrees, in `[0, 360)`.
        start_angle: f64,
        /// End angle in degrees, in `[0, 360)`.
        end_angle: f64,
    },
}

/// DXF document builder for sketch profiles.
#[derive(Debug, Clone, Default)]
pub struct DxfDocument {
    shapes: Vec<DxfShape>,
}

impl DxfDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every line and arc of a sketch.
    pub fn from_sketch(sketch: &Sketch) -> Self {
        let mut doc = Self::new();
        for entity in sketch.entities_iter() {
            match entity {
                SketchEntity::Line {
                    start,
                    end,
                    construction,
                    ..
                } => {
                    let (Some(start), Some(end)) =
                        (sketch.point_position(*start), sketch.point_position(*end))
                    else {
                        tracing::warn!(id = %entity.id(), "line with missing endpoints skipped");
                        continue;
                    };
                    let layer = if *construction {
                        CONSTRUCTION_LAYER
                    } else {
                        PROFILE_LAYER
                    };
                    doc.shapes.push(DxfShape::Line { start, end, layer });
                }
                SketchEntity::Arc {
                    center,
                    start,
                    radius,
                    sweep,
                    ..
                } => {
                    let (Some(center), Some(start)) =
                        (sketch.point_position(*center), sketch.point_position(*start))
                    else {
                        tracing::warn!(id = %entity.id(), "arc with missing points skipped");
                        continue;
                    };
                    doc.add_arc(center, *radius, start, *sweep);
                }
                SketchEntity::Point { .. } => {}
            }
        }
        doc
    }

    /// Add an arc given its center, the point it starts from and a signed sweep in radians.
    pub fn add_arc(&mut self, center: DVec2, radius: f64, start: DVec2, sweep: f64) {
        let offset = start - center;
        let from = offset.y.atan2(offset.x).to_degrees();
        let to = from + sweep.to_degrees();
        // DXF arcs always run counter-clockwise
        let (start_angle, end_angle) = if sweep >= 0.0 { (from, to) } else { (to, from) };
        self.shapes.push(DxfShape::Arc {
            center,
            radius,
            start_angle: normalize_degrees(start_angle),
            end_angle: normalize_degrees(end_angle),
        });
    }

    /// Shapes collected so far.
    pub fn shapes(&self) -> &[DxfShape] {
        &self.shapes
    }

    /// Number of shapes on a layer (arcs count as profile geometry).
    pub fn count_on_layer(&self, layer: &str) -> usize {
        self.shapes
            .iter()
            .filter(|shape| match shape {
                DxfShape::Line { layer: l, .. } => *l == layer,
                DxfShape::Arc { .. } => layer == PROFILE_LAYER,
            })
            .count()
    }

    /// Export to DXF file
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.export_to_writer(&mut writer)?;
        writer.flush()
    }

    /// Export to any writer
    pub fn export_to_writer(&self, mut writer: impl Write) -> std::io::Result<()> {
        // DXF Header
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "HEADER")?;
        writeln!(writer, "9")?;
        writeln!(writer, "$ACADVER")?;
        writeln!(writer, "1")?;
        writeln!(writer, "AC1009")?; // DXF R12
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        self.write_tables(&mut writer)?;

        // Entities section
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "ENTITIES")?;

        for shape in &self.shapes {
            match shape {
                DxfShape::Line { start, end, layer } => {
                    write_line(&mut writer, *start, *end, layer)?;
                }
                DxfShape::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    write_arc(&mut writer, *center, *radius, *start_angle, *end_angle)?;
                }
            }
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        // End of file
        writeln!(writer, "0")?;
        writeln!(writer, "EOF")?;

        Ok(())
    }

    fn write_tables(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "TABLES")?;
        writeln!(writer, "0")?;
        writeln!(writer, "TABLE")?;
        writeln!(writer, "2")?;
        writeln!(writer, "LAYER")?;
        writeln!(writer, "70")?;
        writeln!(writer, "2")?;

        // (name, color, linetype)
        for (name, color, linetype) in [
            (PROFILE_LAYER, 7, "CONTINUOUS"),
            (CONSTRUCTION_LAYER, 8, "CONTINUOUS"),
        ] {
            writeln!(writer, "0")?;
            writeln!(writer, "LAYER")?;
            writeln!(writer, "2")?;
            writeln!(writer, "{}", name)?;
            writeln!(writer, "70")?;
            writeln!(writer, "0")?;
            writeln!(writer, "62")?;
            writeln!(writer, "{}", color)?;
            writeln!(writer, "6")?;
            writeln!(writer, "{}", linetype)?;
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDTAB")?;
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;
        Ok(())
    }
}

fn write_line(
    writer: &mut impl Write,
    start: DVec2,
    end: DVec2,
    layer: &str,
) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LINE")?;
    writeln!(writer, "8")?;
    writeln!(writer, "{}", layer)?;
    writeln!(writer, "10")?;
    writeln!(writer, "{:.6}", start.x)?;
    writeln!(writer, "20")?;
    writeln!(writer, "{:.6}", start.y)?;
    writeln!(writer, "11")?;
    writeln!(writer, "{:.6}", end.x)?;
    writeln!(writer, "21")?;
    writeln!(writer, "{:.6}", end.y)?;
    Ok(())
}

fn write_arc(
    writer: &mut impl Write,
    center: DVec2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "ARC")?;
    writeln!(writer, "8")?;
    writeln!(writer, "{}", PROFILE_LAYER)?;
    writeln!(writer, "10")?;
    writeln!(writer, "{:.6}", center.x)?;
    writeln!(writer, "20")?;
    writeln!(writer, "{:.6}", center.y)?;
    writeln!(writer, "40")?;
    writeln!(writer, "{:.6}", radius)?;
    writeln!(writer, "50")?;
    writeln!(writer, "{:.6}", start_angle)?;
    writeln!(writer, "51")?;
    writeln!(writer, "{:.6}", end_angle)?;
    Ok(())
}

fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}
