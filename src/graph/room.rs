use crate::geometry::Path2;
use crate::math::Point2;

use super::point::WallPointId;

slotmap::new_key_type! {
    /// Unique identifier for a room.
    pub struct RoomId;
}

/// A closed polygon bounded by wall points.
///
/// `points` is a boundary walk: consecutive points (and the last and first)
/// are joined by a wall or divider.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomData {
    pub points: Vec<WallPointId>,
    pub fill: String,
    pub label: String,
    /// Boundary polygon relative to the first point's location.
    pub shape: Path2,
    /// Floor area with mitered corners pulled in.
    pub area: f64,
    /// Bounding-box minimum of the member locations.
    pub anchor: Point2,
}

impl RoomData {
    /// Creates a room over an ordered boundary. Geometry is filled in by the
    /// first recompute.
    #[must_use]
    pub fn new(points: Vec<WallPointId>, fill: impl Into<String>) -> Self {
        Self {
            points,
            fill: fill.into(),
            label: "Room".to_owned(),
            shape: Path2::new(Point2::origin(), true),
            area: 0.0,
            anchor: Point2::origin(),
        }
    }
}
