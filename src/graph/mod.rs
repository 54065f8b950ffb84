pub mod edge;
pub mod part;
pub mod point;
pub mod room;

pub use edge::{EdgeData, EdgeEnd, EdgeId, EdgeKind, WallData};
pub use part::{DoorData, WallPartData, WallPartId, WallPartKind};
pub use point::{WallPointData, WallPointId};
pub use room::{RoomData, RoomId};

use crate::error::TopologyError;
use crate::math::angle_2d::direction_angle;
use crate::math::Point2;
use slotmap::{SecondaryMap, SlotMap};

/// Central arena that owns every wall point, edge, wall part and room.
///
/// Entities reference each other via typed IDs (generational indices).
/// Each mutation here is a single structural step; cascading updates
/// (miters, rooms, part placement) are the caller's job.
#[derive(Debug, Default)]
pub struct WallGraph {
    points: SlotMap<WallPointId, WallPointData>,
    edges: SlotMap<EdgeId, EdgeData>,
    parts: SlotMap<WallPartId, WallPartData>,
    rooms: SlotMap<RoomId, RoomData>,
    incidence: SecondaryMap<WallPointId, Vec<EdgeId>>,
}

impl WallGraph {
    /// Creates a new, empty wall graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Point operations ---

    /// Inserts a wall point and returns its ID.
    pub fn add_point(&mut self, location: Point2) -> WallPointId {
        let id = self.points.insert(WallPointData::new(location));
        self.incidence.insert(id, Vec::new());
        id
    }

    /// Removes an unreferenced wall point.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::PointInUse` if any edge still ends at the
    /// point, or `EntityNotFound` if it does not exist.
    pub fn remove_point(&mut self, id: WallPointId) -> Result<WallPointData, TopologyError> {
        let edges = self.incident_edges(id)?.len();
        if edges > 0 {
            return Err(TopologyError::PointInUse { edges });
        }
        self.incidence.remove(id);
        self.points
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("wall point"))
    }

    /// Returns a reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn point(&self, id: WallPointId) -> Result<&WallPointData, TopologyError> {
        self.points
            .get(id)
            .ok_or(TopologyError::EntityNotFound("wall point"))
    }

    /// Returns a mutable reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn point_mut(&mut self, id: WallPointId) -> Result<&mut WallPointData, TopologyError> {
        self.points
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("wall point"))
    }

    #[must_use]
    pub fn contains_point(&self, id: WallPointId) -> bool {
        self.points.contains_key(id)
    }

    /// Shorthand for a point's location.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn location(&self, id: WallPointId) -> Result<Point2, TopologyError> {
        Ok(self.point(id)?.location)
    }

    // --- Edge operations ---

    /// Inserts an edge between two existing, distinct points.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::SelfLoop` if `from == to`, or
    /// `EntityNotFound` if either point is missing.
    pub fn add_edge(
        &mut self,
        from: WallPointId,
        to: WallPointId,
        kind: EdgeKind,
    ) -> Result<EdgeId, TopologyError> {
        if from == to {
            return Err(TopologyError::SelfLoop);
        }
        self.point(from)?;
        self.point(to)?;
        let id = self.edges.insert(EdgeData { from, to, kind });
        self.attach_incidence(from, id);
        self.attach_incidence(to, id);
        Ok(id)
    }

    /// Removes an edge and returns its data.
    ///
    /// Attached wall parts are left pointing at the removed key.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<EdgeData, TopologyError> {
        let data = self
            .edges
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("edge"))?;
        self.detach_incidence(data.from, id);
        self.detach_incidence(data.to, id);
        Ok(data)
    }

    /// Moves one end of an edge to another existing point.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the edge or the new point is missing, or
    /// `SelfLoop` if the edge would start and end at the same point.
    pub fn retarget_edge(
        &mut self,
        id: EdgeId,
        end: EdgeEnd,
        new_point: WallPointId,
    ) -> Result<(), TopologyError> {
        self.point(new_point)?;
        let edge = self.edge(id)?;
        let (old, other) = match end {
            EdgeEnd::From => (edge.from, edge.to),
            EdgeEnd::To => (edge.to, edge.from),
        };
        if other == new_point {
            return Err(TopologyError::SelfLoop);
        }
        if old == new_point {
            return Ok(());
        }
        let edge = self.edge_mut(id)?;
        match end {
            EdgeEnd::From => edge.from = new_point,
            EdgeEnd::To => edge.to = new_point,
        }
        self.detach_incidence(old, id);
        self.attach_incidence(new_point, id);
        Ok(())
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns the wall data of an edge.
    ///
    /// # Errors
    ///
    /// Returns `NotAWall` for dividers and measurements.
    pub fn wall(&self, id: EdgeId) -> Result<&WallData, TopologyError> {
        self.edge(id)?.kind.as_wall().ok_or(TopologyError::NotAWall)
    }

    /// Returns the mutable wall data of an edge.
    ///
    /// # Errors
    ///
    /// Returns `NotAWall` for dividers and measurements.
    pub fn wall_mut(&mut self, id: EdgeId) -> Result<&mut WallData, TopologyError> {
        self.edge_mut(id)?
            .kind
            .as_wall_mut()
            .ok_or(TopologyError::NotAWall)
    }

    #[must_use]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    /// Locations of an edge's `from` and `to` points.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is missing.
    pub fn edge_segment(&self, id: EdgeId) -> Result<(Point2, Point2), TopologyError> {
        let edge = self.edge(id)?;
        Ok((self.location(edge.from)?, self.location(edge.to)?))
    }

    /// Centreline length of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or an endpoint is missing.
    pub fn edge_length(&self, id: EdgeId) -> Result<f64, TopologyError> {
        let (a, b) = self.edge_segment(id)?;
        Ok((b - a).norm())
    }

    /// Angle at which an edge leaves `point`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTopology` if `point` is not an endpoint of the edge.
    pub fn edge_angle_from(&self, id: EdgeId, point: WallPointId) -> Result<f64, TopologyError> {
        let other = self.other_end(id, point)?;
        Ok(direction_angle(&self.location(point)?, &self.location(other)?))
    }

    /// The endpoint of `id` opposite `point`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTopology` if `point` is not an endpoint of the edge.
    pub fn other_end(&self, id: EdgeId, point: WallPointId) -> Result<WallPointId, TopologyError> {
        self.edge(id)?.other(point).ok_or_else(|| {
            TopologyError::InvalidTopology("point is not an endpoint of the edge".to_owned())
        })
    }

    /// Edges ending at a point, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn incident_edges(&self, id: WallPointId) -> Result<&[EdgeId], TopologyError> {
        self.incidence
            .get(id)
            .map(Vec::as_slice)
            .ok_or(TopologyError::EntityNotFound("wall point"))
    }

    /// Edges ending at a point, sorted by the angle at which they leave it.
    ///
    /// Exact angle ties fall back to key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or one of its edges is missing.
    pub fn edges_incident_to(&self, id: WallPointId) -> Result<Vec<EdgeId>, TopologyError> {
        let mut keyed = self
            .incident_edges(id)?
            .iter()
            .map(|&e| Ok((self.edge_angle_from(e, id)?, e)))
            .collect::<Result<Vec<_>, TopologyError>>()?;
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(keyed.into_iter().map(|(_, e)| e).collect())
    }

    /// Number of edges ending at a point.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn degree(&self, id: WallPointId) -> Result<usize, TopologyError> {
        Ok(self.incident_edges(id)?.len())
    }

    /// First edge of any kind joining `a` and `b`.
    #[must_use]
    pub fn edge_between(&self, a: WallPointId, b: WallPointId) -> Option<EdgeId> {
        self.incidence
            .get(a)?
            .iter()
            .copied()
            .find(|&e| self.edges.get(e).is_some_and(|d| d.other(a) == Some(b)))
    }

    /// Widest wall ending at a point, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn max_wall_width(&self, id: WallPointId) -> Result<Option<f64>, TopologyError> {
        let mut max: Option<f64> = None;
        for &e in self.incident_edges(id)? {
            if let Some(w) = self.edge(e)?.kind.as_wall() {
                max = Some(max.map_or(w.width, |m| m.max(w.width)));
            }
        }
        Ok(max)
    }

    fn attach_incidence(&mut self, point: WallPointId, edge: EdgeId) {
        if let Some(list) = self.incidence.get_mut(point) {
            list.push(edge);
        }
    }

    fn detach_incidence(&mut self, point: WallPointId, edge: EdgeId) {
        if let Some(list) = self.incidence.get_mut(point) {
            list.retain(|e| *e != edge);
        }
    }

    // --- Wall part operations ---

    /// Inserts a wall part and returns its ID. The owning wall's part list
    /// is not touched.
    pub fn add_part(&mut self, data: WallPartData) -> WallPartId {
        self.parts.insert(data)
    }

    /// Removes a wall part and returns its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn remove_part(&mut self, id: WallPartId) -> Result<WallPartData, TopologyError> {
        self.parts
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("wall part"))
    }

    /// Returns a reference to the part data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn part(&self, id: WallPartId) -> Result<&WallPartData, TopologyError> {
        self.parts
            .get(id)
            .ok_or(TopologyError::EntityNotFound("wall part"))
    }

    /// Returns a mutable reference to the part data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn part_mut(&mut self, id: WallPartId) -> Result<&mut WallPartData, TopologyError> {
        self.parts
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("wall part"))
    }

    #[must_use]
    pub fn contains_part(&self, id: WallPartId) -> bool {
        self.parts.contains_key(id)
    }

    // --- Room operations ---

    /// Inserts a room and returns its ID. Member points are not linked.
    pub fn add_room(&mut self, data: RoomData) -> RoomId {
        self.rooms.insert(data)
    }

    /// Removes a room and returns its data. Member points are not unlinked.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn remove_room(&mut self, id: RoomId) -> Result<RoomData, TopologyError> {
        self.rooms
            .remove(id)
            .ok_or(TopologyError::EntityNotFound("room"))
    }

    /// Returns a reference to the room data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn room(&self, id: RoomId) -> Result<&RoomData, TopologyError> {
        self.rooms
            .get(id)
            .ok_or(TopologyError::EntityNotFound("room"))
    }

    /// Returns a mutable reference to the room data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the graph.
    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut RoomData, TopologyError> {
        self.rooms
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("room"))
    }

    #[must_use]
    pub fn contains_room(&self, id: RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    // --- Snapshot access ---

    pub fn points(&self) -> impl Iterator<Item = (WallPointId, &WallPointData)> {
        self.points.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    pub fn parts(&self) -> impl Iterator<Item = (WallPartId, &WallPartData)> {
        self.parts.iter()
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &RoomData)> {
        self.rooms.iter()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
