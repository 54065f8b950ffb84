use super::{Point2, Vector2};

/// Computes the unsigned area of a closed polygon.
///
/// Sums `(x_j + x_i) * (y_i - y_j)` over every cyclic vertex pair, so the
/// result is independent of winding and of which vertex comes first.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        sum += (points[j].x + points[i].x) * (points[i].y - points[j].y);
        j = i;
    }
    (sum / 2.0).abs()
}

/// Ray-casting point-in-polygon test.
///
/// Points exactly on the boundary may land on either side.
#[must_use]
pub fn point_in_polygon(vertices: &[Point2], point: &Point2) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);
        if (yi > point.y) != (yj > point.y) && point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns the component-wise minimum and maximum of a point set.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn area_independent_of_winding_and_rotation() {
        let pts = vec![p(0.0, 0.0), p(4.0, 0.0), p(5.0, 3.0), p(2.0, 5.0), p(-1.0, 2.0)];
        let base = polygon_area(&pts);
        assert!(base > 0.0);

        let mut reversed = pts.clone();
        reversed.reverse();
        assert_abs_diff_eq!(polygon_area(&reversed), base, epsilon = 1e-9);

        for k in 1..pts.len() {
            let mut rotated = pts.clone();
            rotated.rotate_left(k);
            assert_abs_diff_eq!(polygon_area(&rotated), base, epsilon = 1e-9);
        }
    }

    #[test]
    fn right_triangle_area() {
        let pts = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)];
        assert_abs_diff_eq!(polygon_area(&pts), 5000.0, epsilon = 1e-9);
    }

    #[test]
    fn area_degenerate() {
        assert!(polygon_area(&[p(0.0, 0.0), p(1.0, 1.0)]).abs() < TOLERANCE);
        assert!(polygon_area(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn point_in_concave_polygon() {
        // L-shaped room.
        let l = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 4.0),
            p(4.0, 4.0),
            p(4.0, 10.0),
            p(0.0, 10.0),
        ];
        assert!(point_in_polygon(&l, &p(2.0, 2.0)));
        assert!(point_in_polygon(&l, &p(2.0, 8.0)));
        assert!(!point_in_polygon(&l, &p(8.0, 8.0)));
        assert!(!point_in_polygon(&l, &p(-1.0, 2.0)));
    }

    #[test]
    fn left_normal_basic() {
        let n = left_normal(Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(n.x, 0.0);
        assert_abs_diff_eq!(n.y, 1.0);
    }
}
