use crate::error::Result;
use crate::geometry::Path2;
use crate::graph::{RoomId, WallGraph, WallPointId};
use crate::math::polygon_2d::{bounds_2d, point_in_polygon, polygon_area};
use crate::math::Point2;

fn locations(graph: &WallGraph, points: &[WallPointId]) -> Result<Vec<Point2>> {
    points
        .iter()
        .map(|&p| Ok(graph.location(p)?))
        .collect()
}

/// Builds a room's closed boundary relative to its first point.
///
/// # Errors
///
/// Returns an error if a member point is missing.
pub fn room_shape(graph: &WallGraph, points: &[WallPointId]) -> Result<Path2> {
    let locs = locations(graph, points)?;
    let Some(first) = locs.first().copied() else {
        return Ok(Path2::new(Point2::origin(), true));
    };
    let mut path = Path2::new(Point2::origin(), true);
    for loc in &locs[1..] {
        path.line_to(Point2::from(loc - first));
    }
    path.line_to(Point2::origin());
    Ok(path)
}

/// Bounding-box minimum of a room's member locations.
///
/// # Errors
///
/// Returns an error if a member point is missing.
pub fn room_anchor(graph: &WallGraph, points: &[WallPointId]) -> Result<Point2> {
    let locs = locations(graph, points)?;
    Ok(bounds_2d(&locs).map_or_else(Point2::origin, |(min, _)| min))
}

/// Floor area of a room.
///
/// Wall points sit on wall centrelines, so each vertex is swapped for the
/// last of its miter corners that falls inside the room, when there is one.
/// Each vertex is resolved once per call.
///
/// # Errors
///
/// Returns an error if a member point is missing.
pub fn room_area(graph: &WallGraph, points: &[WallPointId]) -> Result<f64> {
    let locs = locations(graph, points)?;
    if locs.len() < 3 {
        return Ok(0.0);
    }
    let mut resolved = Vec::with_capacity(points.len());
    for (&id, loc) in points.iter().zip(&locs) {
        let corner = graph
            .point(id)?
            .miter_corners
            .iter()
            .rev()
            .find(|c| point_in_polygon(&locs, c))
            .copied();
        resolved.push(corner.unwrap_or(*loc));
    }
    Ok(polygon_area(&resolved))
}

/// Recomputes a room's shape, anchor and area from its member points.
pub struct RecomputeRoom {
    room: RoomId,
}

impl RecomputeRoom {
    /// Creates a new `RecomputeRoom` operation.
    #[must_use]
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Executes the recompute.
    ///
    /// # Errors
    ///
    /// Returns an error if the room or one of its points is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<()> {
        let points = graph.room(self.room)?.points.clone();
        let shape = room_shape(graph, &points)?;
        let anchor = room_anchor(graph, &points)?;
        let area = room_area(graph, &points)?;
        tracing::trace!(points = points.len(), area, "recomputed room");

        let room = graph.room_mut(self.room)?;
        room.shape = shape;
        room.anchor = anchor;
        room.area = area;
        Ok(())
    }
}
