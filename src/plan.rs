//! Edit-level entry point for front ends.
//!
//! Every verb applies one structural edit to the wall graph, runs the
//! recompute pipeline over the edited neighbourhood and reports both sets of
//! writes. Derived writes are reported separately so an undo layer can record
//! them without treating them as user edits.

use crate::config::PlanConfig;
use crate::error::{OperationError, Result, TopologyError};
use crate::graph::{EdgeEnd, EdgeId, EdgeKind, RoomId, WallGraph, WallPartId, WallPartKind, WallPointId};
use crate::math::{ensure_finite, Point2};
use crate::operations::room::{CreateRoom, DeleteRoom, RevalidateRoomsForPoint, ValidateRoom};
use crate::operations::topology::{
    single_edge_between, CopyFragment, DeleteEdge, DeletePoint, FragmentMap, JoinFromWall,
    JoinStraightWalls, MergePoints, MovePoint, ResizeWall, SplitEdge,
};
use crate::operations::wall_part::{
    Anchor, AttachWallPart, DeleteWallPart, FindWallPartParent, FlipDoor, ReanchorWallPart,
    SlideWallPart,
};
use crate::operations::{Affected, Edit, EntityKey, Refresh};

/// Result of one plan edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    /// Entities the edit itself wrote or removed.
    pub authored: Affected,
    /// Entities rewritten by the recompute pipeline afterwards.
    pub derived: Affected,
}

/// A floor plan: the wall graph plus the parameters its edits run with.
#[derive(Debug, Default)]
pub struct FloorPlan {
    graph: WallGraph,
    config: PlanConfig,
}

impl FloorPlan {
    /// Creates an empty plan with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty plan with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the parameters are invalid.
    pub fn with_config(config: PlanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph: WallGraph::new(),
            config,
        })
    }

    #[must_use]
    pub fn graph(&self) -> &WallGraph {
        &self.graph
    }

    #[must_use]
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    fn commit<T>(&mut self, edit: Edit<T>) -> Result<Outcome<T>> {
        let derived = Refresh::new(&edit.affected)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        Ok(Outcome {
            value: edit.value,
            authored: edit.affected,
            derived,
        })
    }

    // --- Points and edges ---

    /// Adds a free wall point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for a non-finite location.
    pub fn create_point(&mut self, location: Point2) -> Result<Outcome<WallPointId>> {
        ensure_finite(location)?;
        let id = self.graph.add_point(location);
        let mut affected = Affected::new();
        affected.point(id);
        tracing::debug!(point = ?id, "created wall point");
        self.commit(Edit::new(id, affected))
    }

    /// Removes a wall point that no edge references.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::PointInUse` if an edge still ends at the point.
    pub fn remove_point(&mut self, id: WallPointId) -> Result<Outcome<()>> {
        let edges = self.graph.degree(id)?;
        if edges > 0 {
            return Err(TopologyError::PointInUse { edges }.into());
        }
        let mut affected = RevalidateRoomsForPoint::new(id)
            .execute(&mut self.graph)?
            .affected;
        self.graph.remove_point(id)?;
        affected.removed(EntityKey::Point(id));
        tracing::debug!(point = ?id, "removed wall point");
        self.commit(Edit::new((), affected))
    }

    /// Adds an edge between two existing points.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::SelfLoop` for coincident endpoints and
    /// `OperationError::InvalidInput` for a wall width outside the
    /// configured range.
    pub fn create_edge(
        &mut self,
        from: WallPointId,
        to: WallPointId,
        kind: EdgeKind,
    ) -> Result<Outcome<EdgeId>> {
        if let Some(wall) = kind.as_wall() {
            let (min, max) = (self.config.min_wall_width, self.config.max_wall_width);
            if !(min..=max).contains(&wall.width) {
                return Err(OperationError::InvalidInput(format!(
                    "wall width {} outside [{min}, {max}]",
                    wall.width
                ))
                .into());
            }
        }
        let id = self.graph.add_edge(from, to, kind.fresh_copy())?;
        let mut affected = Affected::new();
        affected.edge(id);
        tracing::debug!(edge = ?id, ?from, ?to, "created edge");
        self.commit(Edit::new(id, affected))
    }

    /// Deletes an edge with its wall parts, collapsing straight leftovers
    /// and dropping rooms that no longer close.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Outcome<()>> {
        let edit = DeleteEdge::new(id)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Moves one end of an edge to another point. Rooms bounded by the
    /// edge's old endpoints are revalidated.
    ///
    /// # Errors
    ///
    /// Returns a structural error, with nothing changed, if the new point is
    /// missing or would make the edge a self-loop.
    pub fn retarget_edge_endpoint(
        &mut self,
        edge: EdgeId,
        end: EdgeEnd,
        point: WallPointId,
    ) -> Result<Outcome<()>> {
        let data = self.graph.edge(edge)?;
        let (from, to) = (data.from, data.to);
        let old = data.end(end);
        let shared: Vec<RoomId> = {
            let other = &self.graph.point(to)?.rooms;
            self.graph
                .point(from)?
                .rooms
                .iter()
                .copied()
                .filter(|r| other.contains(r))
                .collect()
        };
        self.graph.retarget_edge(edge, end, point)?;

        let mut affected = Affected::new();
        affected.edge(edge).point(old).point(point);
        for room in shared {
            affected.merge(ValidateRoom::new(room).execute(&mut self.graph)?.affected);
        }
        self.commit(Edit::new((), affected))
    }

    /// Deletes a point with all its edges and rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if the point does not exist.
    pub fn delete_point(&mut self, id: WallPointId) -> Result<Outcome<()>> {
        let edit = DeletePoint::new(id)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Moves a point.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is missing or the location non-finite.
    pub fn move_point(&mut self, id: WallPointId, to: Point2) -> Result<Outcome<()>> {
        let edit = MovePoint::new(id, to).execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Drops a dangling wall end onto another point.
    ///
    /// # Errors
    ///
    /// See [`MergePoints::execute`].
    pub fn merge_points(
        &mut self,
        dragged: WallPointId,
        target: WallPointId,
    ) -> Result<Outcome<EdgeId>> {
        let edit = MergePoints::new(dragged, target).execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Splits an edge at the point on it nearest `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not exist.
    pub fn split_edge(&mut self, edge: EdgeId, at: Point2) -> Result<Outcome<WallPointId>> {
        ensure_finite(at)?;
        let edit = SplitEdge::new(edge, at)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Collapses a straight two-wall junction; `None` if the point does not
    /// qualify.
    ///
    /// # Errors
    ///
    /// Returns an error if the point does not exist.
    pub fn join_at_point(&mut self, id: WallPointId) -> Result<Outcome<Option<EdgeId>>> {
        let edit = JoinStraightWalls::new(id)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Joins an existing point into the middle of an edge.
    ///
    /// # Errors
    ///
    /// See [`JoinFromWall::execute`].
    pub fn join_from_wall(&mut self, point: WallPointId, edge: EdgeId) -> Result<Outcome<EdgeId>> {
        let edit = JoinFromWall::new(point, edge)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Changes a wall's width by `delta`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotAWall` if the edge is not a wall and
    /// `OperationError::InvalidInput` for a non-finite delta.
    pub fn resize_wall(&mut self, edge: EdgeId, delta: f64) -> Result<Outcome<f64>> {
        let edit = ResizeWall::new(edge, delta)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Pastes a translated copy of a selection.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected entity does not exist.
    pub fn copy_fragment(&mut self, copy: &CopyFragment) -> Result<Outcome<FragmentMap>> {
        let edit = copy.execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// The wall or divider joining exactly two selected points.
    #[must_use]
    pub fn single_edge_between(&self, selection: &[WallPointId]) -> Option<EdgeId> {
        single_edge_between(&self.graph, selection)
    }

    // --- Rooms ---

    /// Creates a room from candidate points.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoValidLoop`, with nothing changed, if the
    /// candidates do not close.
    pub fn create_room(&mut self, candidates: &[WallPointId]) -> Result<Outcome<RoomId>> {
        let edit = CreateRoom::new(candidates.to_vec()).execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Deletes a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn delete_room(&mut self, id: RoomId) -> Result<Outcome<()>> {
        let edit = DeleteRoom::new(id).execute(&mut self.graph)?;
        self.commit(edit)
    }

    // --- Wall parts ---

    /// Attaches a window or door to a wall.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotAWall` if the edge is not a wall.
    pub fn attach_fixture(
        &mut self,
        edge: EdgeId,
        fraction: f64,
        kind: WallPartKind,
    ) -> Result<Outcome<WallPartId>> {
        let edit = AttachWallPart::new(edge, fraction, kind)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Re-places a part from its stored fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if the part or its wall is missing.
    pub fn reanchor_fixture(&mut self, id: WallPartId) -> Result<Outcome<()>> {
        ReanchorWallPart::new(id)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        let mut affected = Affected::new();
        affected.part(id);
        self.commit(Edit::new((), affected))
    }

    /// Moves a part to the nearest wall around `location`.
    ///
    /// An orphaned result is not an error; the caller decides whether to
    /// delete the part.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn reparent_fixture(&mut self, id: WallPartId, location: Point2) -> Result<Outcome<Anchor>> {
        ensure_finite(location)?;
        let edit = FindWallPartParent::new(id)
            .at(location)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Slides a part along its wall toward `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn slide_fixture(&mut self, id: WallPartId, to: Point2, snap: bool) -> Result<Outcome<Anchor>> {
        ensure_finite(to)?;
        let edit = SlideWallPart::new(id, to)
            .with_snap(snap)
            .with_config(self.config)
            .execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Deletes a part.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn delete_fixture(&mut self, id: WallPartId) -> Result<Outcome<()>> {
        let edit = DeleteWallPart::new(id).execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Mirrors a door's swing.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the part is not a door.
    pub fn flip_door(&mut self, id: WallPartId) -> Result<Outcome<()>> {
        let edit = FlipDoor::new(id).execute(&mut self.graph)?;
        self.commit(edit)
    }

    /// Moves a door's hinge to the other jamb.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the part is not a door.
    pub fn swap_door_hinge(&mut self, id: WallPartId) -> Result<Outcome<()>> {
        let edit = FlipDoor::hinge(id).execute(&mut self.graph)?;
        self.commit(edit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;

    fn init_tracing() {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    }

    fn points(plan: &mut FloorPlan, coords: &[(f64, f64)]) -> Vec<WallPointId> {
        coords
            .iter()
            .map(|&(x, y)| plan.create_point(Point2::new(x, y)).unwrap().value)
            .collect()
    }

    fn wall(plan: &mut FloorPlan, a: WallPointId, b: WallPointId) -> EdgeId {
        plan.create_edge(a, b, EdgeKind::wall(10.0)).unwrap().value
    }

    #[test]
    fn triangle_room_needs_a_closing_wall() {
        init_tracing();
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        wall(&mut plan, p[0], p[1]);
        wall(&mut plan, p[1], p[2]);

        let err = plan.create_room(&p).unwrap_err();
        assert!(err.is_no_valid_loop());
        assert_eq!(plan.graph().room_count(), 0);

        wall(&mut plan, p[2], p[0]);
        let outcome = plan.create_room(&p).unwrap();
        let room = plan.graph().room(outcome.value).unwrap();

        // Some rotation of the selection order.
        let start = room.points.iter().position(|&k| k == p[0]).unwrap();
        for i in 0..3 {
            assert_eq!(room.points[(start + i) % 3], p[i]);
        }
        // Centreline area is 5000; mitered corners pull it in.
        assert!(room.area < 5000.0 && room.area > 3000.0, "area {}", room.area);
        assert!(outcome.derived.rooms.contains(&outcome.value));
    }

    #[test]
    fn fixture_fraction_stays_inside_buffers() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (200.0, 0.0)]);
        let e = wall(&mut plan, p[0], p[1]);
        assert_abs_diff_eq!(plan.graph().point(p[0]).unwrap().size, 10.0);

        let part = plan
            .attach_fixture(e, 0.5, WallPartKind::door(60.0))
            .unwrap()
            .value;
        let buffer = crate::operations::wall_part::part_buffer(plan.graph(), e, 60.0).unwrap();
        assert!(buffer.low > 0.0 && buffer.high > 0.0);
        let fraction = plan.graph().part(part).unwrap().fraction;
        assert!(buffer.low < fraction && fraction < buffer.upper());
    }

    #[test]
    fn straight_walls_join_into_one() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (80.0, 0.0), (200.0, 0.0)]);
        wall(&mut plan, p[0], p[1]);
        wall(&mut plan, p[1], p[2]);
        assert!(plan.graph().point(p[1]).unwrap().junction.straight);

        let kept = plan.join_at_point(p[1]).unwrap().value.unwrap();
        assert!(!plan.graph().contains_point(p[1]));
        assert_abs_diff_eq!(plan.graph().edge_length(kept).unwrap(), 200.0, epsilon = 1e-9);
        // Both outer points are now wall ends.
        assert_eq!(plan.graph().point(p[0]).unwrap().miter_corners.len(), 2);
    }

    #[test]
    fn split_then_join_round_trip() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(10.0, 10.0), (250.0, 10.0)]);
        let e = wall(&mut plan, p[0], p[1]);
        let mid = plan.split_edge(e, Point2::new(70.0, 30.0)).unwrap().value;
        assert_eq!(plan.graph().edge_count(), 2);
        let kept = plan.join_at_point(mid).unwrap().value.unwrap();
        assert_abs_diff_eq!(plan.graph().edge_length(kept).unwrap(), 240.0, epsilon = 1e-9);
        assert_eq!(plan.graph().edge_count(), 1);
    }

    #[test]
    fn deleting_a_member_below_three_deletes_the_room() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        wall(&mut plan, p[0], p[1]);
        wall(&mut plan, p[1], p[2]);
        wall(&mut plan, p[2], p[0]);
        let room = plan.create_room(&p).unwrap().value;

        let outcome = plan.delete_point(p[2]).unwrap();
        assert!(!plan.graph().contains_room(room));
        assert!(outcome.authored.was_removed(EntityKey::Room(room)));
        for &k in &p[..2] {
            assert!(plan.graph().point(k).unwrap().rooms.is_empty());
        }
    }

    #[test]
    fn wall_end_cap_is_half_width() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (60.0, 80.0)]);
        plan.create_edge(p[0], p[1], EdgeKind::wall(14.0)).unwrap();
        let data = plan.graph().point(p[1]).unwrap();
        assert_eq!(data.miter_corners.len(), 2);
        for c in &data.miter_corners {
            assert_abs_diff_eq!((c - data.location).norm(), 7.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn moving_a_point_is_reported_as_derived_work() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0)]);
        let e = wall(&mut plan, p[0], p[1]);
        let part = plan.attach_fixture(e, 0.5, WallPartKind::Window).unwrap().value;

        let outcome = plan.move_point(p[1], Point2::new(300.0, 0.0)).unwrap();
        assert_eq!(outcome.authored.points.len(), 1);
        assert!(outcome.derived.points.contains(&p[0]));
        assert!(outcome.derived.parts.contains(&part));
        assert_abs_diff_eq!(plan.graph().part(part).unwrap().location.x, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn removing_a_referenced_point_is_rejected() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0)]);
        wall(&mut plan, p[0], p[1]);
        let err = plan.remove_point(p[0]).unwrap_err();
        assert!(err.is_structural());
        assert!(plan.graph().contains_point(p[0]));
    }

    #[test]
    fn out_of_range_width_rejected() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0)]);
        assert!(plan.create_edge(p[0], p[1], EdgeKind::wall(100.0)).is_err());
        assert_eq!(plan.graph().edge_count(), 0);
    }

    #[test]
    fn copy_pastes_a_room() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        let edges = vec![
            wall(&mut plan, p[0], p[1]),
            wall(&mut plan, p[1], p[2]),
            wall(&mut plan, p[2], p[0]),
        ];
        let room = plan.create_room(&p).unwrap().value;
        let area = plan.graph().room(room).unwrap().area;

        let copy = CopyFragment::new(Vector2::new(0.0, 400.0))
            .with_points(p.clone())
            .with_edges(edges)
            .with_rooms([room]);
        let map = plan.copy_fragment(&copy).unwrap().value;
        let pasted = plan.graph().room(map.rooms[&room]).unwrap();
        // Miters are rebuilt on the copies before the area is recomputed.
        assert_abs_diff_eq!(pasted.area, area, epsilon = 1e-6);
    }

    #[test]
    fn merge_and_single_wall_selection() {
        let mut plan = FloorPlan::new();
        let p = points(&mut plan, &[(0.0, 0.0), (100.0, 0.0), (102.0, 3.0)]);
        let e = wall(&mut plan, p[0], p[2]);
        plan.merge_points(p[2], p[1]).unwrap();
        assert_eq!(plan.single_edge_between(&[p[0], p[1]]), Some(e));
        assert_abs_diff_eq!(plan.graph().point(p[1]).unwrap().size, 10.0);
    }
}
