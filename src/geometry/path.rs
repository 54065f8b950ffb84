use crate::math::polygon_2d::bounds_2d;
use crate::math::{Point2, Vector2};

/// A single step of a [`Path2`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Jumps to a point without drawing.
    Move(Point2),
    /// Draws a straight line to a point.
    Line(Point2),
}

impl PathSegment {
    /// The point this segment ends at.
    #[must_use]
    pub fn point(&self) -> Point2 {
        match self {
            Self::Move(p) | Self::Line(p) => *p,
        }
    }

    fn point_mut(&mut self) -> &mut Point2 {
        match self {
            Self::Move(p) | Self::Line(p) => p,
        }
    }
}

/// A straight-segment path, optionally closed back to its start.
#[derive(Debug, Clone, PartialEq)]
pub struct Path2 {
    pub start: Point2,
    pub segments: Vec<PathSegment>,
    pub closed: bool,
}

impl Path2 {
    /// Creates an empty path starting at `start`.
    #[must_use]
    pub fn new(start: Point2, closed: bool) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed,
        }
    }

    /// Builds a path drawing straight through every point.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut path = Self::new(*first, closed);
        for p in rest {
            path.line_to(*p);
        }
        Some(path)
    }

    pub fn line_to(&mut self, p: Point2) {
        self.segments.push(PathSegment::Line(p));
    }

    pub fn move_to(&mut self, p: Point2) {
        self.segments.push(PathSegment::Move(p));
    }

    /// Every point on the path, starting point first.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        std::iter::once(self.start)
            .chain(self.segments.iter().map(PathSegment::point))
            .collect()
    }

    /// Bounding box of the path as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point2, Point2) {
        bounds_2d(&self.points()).unwrap_or((self.start, self.start))
    }

    /// Shifts every point by `offset`.
    pub fn translate(&mut self, offset: &Vector2) {
        self.start += offset;
        for seg in &mut self.segments {
            *seg.point_mut() += offset;
        }
    }

    /// Moves the path so its bounding box minimum sits at the origin and
    /// returns the applied displacement.
    pub fn normalize(&mut self) -> Vector2 {
        let (min, _) = self.bounds();
        let disp = -min.coords;
        self.translate(&disp);
        disp
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_points_keeps_order() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 3.0)];
        let path = Path2::from_points(&pts, true).unwrap();
        assert_eq!(path.points(), pts.to_vec());
        assert!(path.closed);
        assert!(Path2::from_points(&[], false).is_none());
    }

    #[test]
    fn normalize_reports_displacement() {
        let mut path = Path2::new(Point2::new(0.0, 0.0), false);
        path.line_to(Point2::new(-5.0, 2.0));
        path.move_to(Point2::new(3.0, -1.0));
        let disp = path.normalize();
        assert_abs_diff_eq!(disp.x, 5.0);
        assert_abs_diff_eq!(disp.y, 1.0);
        assert_abs_diff_eq!(path.start.x, 5.0);
        assert_abs_diff_eq!(path.start.y, 1.0);
        let (min, max) = path.bounds();
        assert_abs_diff_eq!(min.x, 0.0);
        assert_abs_diff_eq!(min.y, 0.0);
        assert_abs_diff_eq!(max.x, 8.0);
        assert_abs_diff_eq!(max.y, 3.0);
        assert!(matches!(path.segments[1], PathSegment::Move(_)));
    }
}
