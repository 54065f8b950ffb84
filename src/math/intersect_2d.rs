use super::{Vector2, TOLERANCE};

/// Intersection of two wall faces meeting at a shared junction at the origin.
///
/// Wall `a` leaves the origin at angle `angle_a` with half-width `half_a`,
/// wall `b` at `angle_b` with `half_b`. The face of `a` turned toward `b`
/// (counter-clockwise) is intersected with the face of `b` turned toward `a`.
/// Returns the corner relative to the junction, or `None` when the walls are
/// parallel.
///
/// With `s = sin(angle_b - angle_a)` the corner is
/// `dir(a) * half_b / s + dir(b) * half_a / s`. For a sweep wider than π the
/// sine is negative and the corner lands on the exterior side.
#[must_use]
pub fn offset_corner(angle_a: f64, half_a: f64, angle_b: f64, half_b: f64) -> Option<Vector2> {
    let s = (angle_b - angle_a).sin();
    if s.abs() < TOLERANCE {
        return None;
    }
    let dir_a = Vector2::new(angle_a.cos(), angle_a.sin());
    let dir_b = Vector2::new(angle_b.cos(), angle_b.sin());
    Some(dir_a * (half_b / s) + dir_b * (half_a / s))
}

/// Pushes a junction-relative point further from the origin by `length`.
#[must_use]
pub fn extend_point(v: &Vector2, length: f64) -> Vector2 {
    let angle = v.y.atan2(v.x);
    Vector2::new(v.x + length * angle.cos(), v.y + length * angle.sin())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn right_angle_inner_corner() {
        // Walls along +x and +y, both 10 wide: inner corner at (5, 5).
        let c = offset_corner(0.0, 5.0, FRAC_PI_2, 5.0).unwrap();
        assert_abs_diff_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn right_angle_mixed_widths() {
        // Wall along +x is 4 wide, wall along +y is 10 wide.
        // The corner sits 2 above the x wall and 5 right of the y wall.
        let c = offset_corner(0.0, 2.0, FRAC_PI_2, 5.0).unwrap();
        assert_abs_diff_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn reflex_sweep_gives_exterior_corner() {
        // From +x sweeping 270° to -y: the outer corner of an L at (-5, 5).
        let c = offset_corner(0.0, 5.0, 1.5 * PI, 5.0).unwrap();
        assert_abs_diff_eq!(c.x, -5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn opposite_walls_have_no_corner() {
        assert!(offset_corner(0.0, 5.0, PI, 5.0).is_none());
        assert!(offset_corner(1.0, 5.0, 1.0, 5.0).is_none());
    }

    #[test]
    fn extend_keeps_direction() {
        let e = extend_point(&Vector2::new(3.0, 4.0), 5.0);
        assert_abs_diff_eq!(e.x, 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.y, 8.0, epsilon = 1e-9);
    }
}
