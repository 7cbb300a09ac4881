//! Derived angles and dimension label placement

use glam::DVec2;
use nozzle_cad::{LineHandle, POINT_TOLERANCE};

/// Angle in degrees of a right triangle from its opposite and adjacent sides.
///
/// Uses the two-argument arctangent, so an adjacent side of zero gives
/// exactly 90° and a negative one lands in (90°, 180°). A degenerate
/// triangle (both sides zero) is defined as 90°.
pub fn exit_angle_degrees(opposite: f64, adjacent: f64) -> f64 {
    if opposite == 0.0 && adjacent == 0.0 {
        return 90.0;
    }
    opposite.atan2(adjacent).to_degrees()
}

/// Where to put the text of a distance dimension between `p1` and `p2`.
///
/// The label sits at the midpoint, shifted by `offset` perpendicular to the
/// segment.
pub fn distance_label_position(p1: DVec2, p2: DVec2, offset: f64) -> DVec2 {
    let mid = (p1 + p2) / 2.0;
    if p2.x - p1.x == 0.0 {
        return DVec2::new(mid.x + offset, mid.y);
    }
    if p2.y - p1.y == 0.0 {
        return DVec2::new(mid.x, mid.y + offset);
    }

    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    let normal_slope = -1.0 / slope;
    let delta_x = offset / (normal_slope * normal_slope + 1.0).sqrt();
    let delta = DVec2::new(delta_x, delta_x * normal_slope);
    if p1.x <= p2.x { mid + delta } else { mid - delta }
}

/// Where to put the text of an angular dimension between two lines.
///
/// Anchors at `b`'s start when `a` starts on either end of `b`, otherwise
/// at `a`'s start.
pub fn angular_label_position(a: &LineHandle, b: &LineHandle) -> DVec2 {
    let a_start = a.start.position;
    if a_start.distance(b.start.position) < POINT_TOLERANCE
        || a_start.distance(b.end.position) < POINT_TOLERANCE
    {
        b.start.position
    } else {
        a_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nozzle_cad::{LineKind, PointHandle};
    use uuid::Uuid;

    fn line(start: DVec2, end: DVec2) -> LineHandle {
        LineHandle {
            id: Uuid::new_v4(),
            start: PointHandle::new(Uuid::new_v4(), start),
            end: PointHandle::new(Uuid::new_v4(), end),
            kind: LineKind::Normal,
        }
    }

    #[test]
    fn test_exit_angle_matches_atan2() {
        for (opposite, adjacent) in [(11.59, 0.305), (5.0, 5.0), (3.0, -1.0), (0.1, 20.0)] {
            let angle = exit_angle_degrees(opposite, adjacent);
            assert_relative_eq!(angle, f64::atan2(opposite, adjacent).to_degrees());
            assert!(angle > 0.0 && angle < 180.0, "angle out of range: {}", angle);
        }
    }

    #[test]
    fn test_exit_angle_degenerate_cases() {
        assert_eq!(exit_angle_degrees(11.59, 0.0), 90.0);
        assert_eq!(exit_angle_degrees(0.0, 0.0), 90.0);
        assert!(exit_angle_degrees(11.59, -0.5) > 90.0);
    }

    #[test]
    fn test_default_exit_angle() {
        let angle = exit_angle_degrees(11.59, 3.23 / 2.0 - 2.62 / 2.0);
        assert_relative_eq!(angle, 88.49, epsilon = 0.01);
    }

    #[test]
    fn test_vertical_label() {
        let label = distance_label_position(DVec2::ZERO, DVec2::new(0.0, 10.0), -0.05);
        assert_eq!(label, DVec2::new(-0.05, 5.0));
    }

    #[test]
    fn test_horizontal_label() {
        let label = distance_label_position(DVec2::new(0.0, 4.0), DVec2::new(2.0, 4.0), -0.05);
        assert_eq!(label.x, 1.0);
        assert_relative_eq!(label.y, 3.95, epsilon = 1e-12);
    }

    #[test]
    fn test_sloped_label_is_perpendicular() {
        let p1 = DVec2::new(0.0, 0.0);
        let p2 = DVec2::new(4.0, 2.0);
        let label = distance_label_position(p1, p2, -0.05);
        let mid = (p1 + p2) / 2.0;

        assert_relative_eq!((label - mid).length(), 0.05, epsilon = 1e-12);
        assert_relative_eq!((label - mid).dot(p2 - p1), 0.0, epsilon = 1e-12);

        // a right-to-left segment puts the label on the other side
        let reversed = distance_label_position(p2, p1, -0.05);
        assert_relative_eq!(reversed.x - mid.x, mid.x - label.x, epsilon = 1e-12);
        assert_relative_eq!(reversed.y - mid.y, mid.y - label.y, epsilon = 1e-12);
    }

    #[test]
    fn test_angular_label_shared_start() {
        let a = line(DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0));
        let b = line(DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.5));
        assert_eq!(angular_label_position(&a, &b), DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_angular_label_on_b_end() {
        let a = line(DVec2::new(1.0, 1.0), DVec2::new(2.0, 0.0));
        let b = line(DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0));
        assert_eq!(angular_label_position(&a, &b), DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_angular_label_disjoint() {
        let a = line(DVec2::new(3.0, 3.0), DVec2::new(4.0, 0.0));
        let b = line(DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0));
        assert_eq!(angular_label_position(&a, &b), DVec2::new(3.0, 3.0));
    }
}
