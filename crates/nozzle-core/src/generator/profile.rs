//! Drawing of the shared symmetry axes and of one offset profile

use glam::DVec2;
use nozzle_cad::{
    ArcHandle, ArcOrientation, CurveRef, LineHandle, LineKind, PointHandle, SketchSurface,
    SurfaceResult,
};

use crate::geometry::{angular_label_position, distance_label_position};
use crate::parameters::NozzleParameters;

/// The two vertical construction lines every profile hangs off
#[derive(Debug, Clone, Copy)]
pub(crate) struct SymmetryAxes {
    /// From the origin (exit plane) up to the throat plane
    pub exit_line: LineHandle,
    /// From the throat plane up to the injector face
    pub chamber_line: LineHandle,
}

/// Draws onto a surface with a fixed label offset and helper line length
pub(crate) struct ProfileBuilder<'a> {
    surface: &'a mut dyn SketchSurface,
    label_offset: f64,
    helper_line_length: f64,
}

impl<'a> ProfileBuilder<'a> {
    /// Create a new builder over `surface`
    pub fn new(
        surface: &'a mut dyn SketchSurface,
        label_offset: f64,
        helper_line_length: f64,
    ) -> Self {
        Self {
            surface,
            label_offset,
            helper_line_length,
        }
    }

    /// Draw the exit and chamber symmetry lines.
    ///
    /// `params` must already be in internal units.
    pub fn draw_axes(&mut self, params: &NozzleParameters) -> SurfaceResult<SymmetryAxes> {
        let origin = self.surface.origin();

        let throat_plane = self.surface.add_point(DVec2::new(0.0, params.exit_length))?;
        let exit_line = self
            .surface
            .add_line(&origin, &throat_plane, LineKind::Construction)?;
        self.surface.add_vertical(&exit_line)?;
        self.dimension_distance(&exit_line.start, &exit_line.end)?;

        let injector_face = self
            .surface
            .add_point(DVec2::new(0.0, params.nozzle_length()))?;
        let chamber_line =
            self.surface
                .add_line(&exit_line.end, &injector_face, LineKind::Construction)?;
        self.surface.add_vertical(&chamber_line)?;
        self.dimension_distance(&chamber_line.start, &chamber_line.end)?;

        Ok(SymmetryAxes {
            exit_line,
            chamber_line,
        })
    }

    /// Draw one closed-by-constraints profile for radii already offset and converted
    pub fn draw_profile(
        &mut self,
        params: &NozzleParameters,
        axes: &SymmetryAxes,
    ) -> SurfaceResult<()> {
        let exit_angle = params.exit_angle();
        let nozzle_length = params.nozzle_length();

        let throat_line = self.radius_line(
            &axes.exit_line.end,
            DVec2::new(params.throat_radius, params.exit_length),
        )?;
        let chamber_radius_line = self.radius_line(
            &axes.chamber_line.end,
            DVec2::new(params.chamber_radius, nozzle_length),
        )?;

        let exit_point = self.surface.add_point(DVec2::new(params.exit_radius, 0.0))?;
        let exit_line = self
            .surface
            .add_line(&throat_line.end, &exit_point, LineKind::Normal)?;
        self.surface.add_angular_dimension(
            &exit_line,
            &throat_line,
            angular_label_position(&exit_line, &throat_line),
            Some(exit_angle),
        )?;

        let cylinder_end = self.surface.add_point(DVec2::new(
            params.chamber_radius,
            nozzle_length - params.chamber_cylinder_length,
        ))?;
        let cylinder_line =
            self.surface
                .add_line(&chamber_radius_line.end, &cylinder_end, LineKind::Normal)?;
        self.surface.add_vertical(&cylinder_line)?;

        let convergence_arc = self.fillet(
            &cylinder_line.end,
            params.convergence_radius,
            ArcOrientation::Q4,
        )?;
        let divergence_arc =
            self.fillet(&throat_line.end, params.divergence_radius, ArcOrientation::Q3)?;

        let helper_top = self
            .surface
            .add_point(divergence_arc.end.position + DVec2::new(0.0, self.helper_line_length))?;
        let helper_line =
            self.surface
                .add_line(&divergence_arc.end, &helper_top, LineKind::Construction)?;
        let connecting_line =
            self.surface
                .add_line(&divergence_arc.end, &convergence_arc.end, LineKind::Normal)?;
        self.surface.add_vertical(&helper_line)?;
        self.surface.add_angular_dimension(
            &connecting_line,
            &helper_line,
            angular_label_position(&connecting_line, &helper_line),
            Some(-params.convergence_angle),
        )?;

        let tangencies: [(CurveRef, CurveRef); 4] = [
            (cylinder_line.into(), convergence_arc.into()),
            (connecting_line.into(), convergence_arc.into()),
            (connecting_line.into(), divergence_arc.into()),
            (divergence_arc.into(), exit_line.into()),
        ];
        for (a, b) in tangencies {
            self.surface.add_tangent(a, b)?;
        }

        Ok(())
    }

    // ============== Helpers ==============

    /// Horizontal construction line from an axis point out to `end`, dimensioned
    fn radius_line(&mut self, axis_point: &PointHandle, end: DVec2) -> SurfaceResult<LineHandle> {
        let end = self.surface.add_point(end)?;
        let line = self
            .surface
            .add_line(axis_point, &end, LineKind::Construction)?;
        self.dimension_distance(&line.start, &line.end)?;
        self.surface.add_horizontal(&line)?;
        Ok(line)
    }

    /// 45° arc from `start` with its start-to-center radius dimensioned
    fn fillet(
        &mut self,
        start: &PointHandle,
        radius: f64,
        orientation: ArcOrientation,
    ) -> SurfaceResult<ArcHandle> {
        let arc = self.surface.add_arc(start, radius, orientation)?;
        self.dimension_distance(&arc.start, &arc.center)?;
        Ok(arc)
    }

    fn dimension_distance(&mut self, a: &PointHandle, b: &PointHandle) -> SurfaceResult<()> {
        let label = distance_label_position(a.position, b.position, self.label_offset);
        self.surface.add_distance_dimension(a, b, label)
    }
}
