use crate::geometry::JunctionGeometry;
use crate::math::Point2;

use super::room::RoomId;

slotmap::new_key_type! {
    /// Unique identifier for a wall point in the wall graph.
    pub struct WallPointId;
}

/// A wall junction or wall end.
#[derive(Debug, Clone)]
pub struct WallPointData {
    /// Document location of the junction centre.
    pub location: Point2,
    /// Junction thickness: the widest incident wall.
    pub size: f64,
    /// Mitered corner points in document coordinates, used to pull room
    /// areas in from wall centrelines.
    pub miter_corners: Vec<Point2>,
    /// Rooms this point is a boundary vertex of.
    pub rooms: Vec<RoomId>,
    /// Cached junction shape, rewritten by the miter pass.
    pub junction: JunctionGeometry,
}

impl WallPointData {
    /// Creates a bare wall point at the given location.
    #[must_use]
    pub fn new(location: Point2) -> Self {
        Self {
            location,
            size: 0.0,
            miter_corners: Vec::new(),
            rooms: Vec::new(),
            junction: JunctionGeometry::hidden(),
        }
    }

    /// Returns `true` if the point is a vertex of `room`.
    #[must_use]
    pub fn in_room(&self, room: RoomId) -> bool {
        self.rooms.contains(&room)
    }

    /// Adds `room` to the membership list unless already present.
    pub fn link_room(&mut self, room: RoomId) {
        if !self.rooms.contains(&room) {
            self.rooms.push(room);
        }
    }

    /// Removes `room` from the membership list.
    pub fn unlink_room(&mut self, room: RoomId) {
        self.rooms.retain(|r| *r != room);
    }
}
