use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::graph::{EdgeEnd, EdgeId, RoomId, WallGraph, WallPointId};
use crate::math::distance_2d::{project_onto_segment, segment_fraction};
use crate::math::Point2;
use crate::operations::room::{ExtendRoom, ValidateRoom};
use crate::operations::wall_part::FindWallPartParent;
use crate::operations::{Affected, Edit};

/// Splits an edge in two at the point on it nearest `at`.
///
/// A new wall point is created on the edge; the original edge keeps the
/// longer half and a new edge of the same kind spans the rest. Parts on the
/// original are reparented to whichever half is nearest, and the new point
/// joins every room bounded by both original endpoints.
pub struct SplitEdge {
    edge: EdgeId,
    at: Point2,
    config: PlanConfig,
}

impl SplitEdge {
    /// Creates a new `SplitEdge` operation.
    #[must_use]
    pub fn new(edge: EdgeId, at: Point2) -> Self {
        Self {
            edge,
            at,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the split and returns the inserted point.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its endpoints is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<WallPointId>> {
        let (a, b) = graph.edge_segment(self.edge)?;
        let location = project_onto_segment(&self.at, &a, &b);
        let size = graph
            .edge(self.edge)?
            .kind
            .as_wall()
            .map_or(self.config.default_point_size, |w| w.width);

        let mid = graph.add_point(location);
        graph.point_mut(mid)?.size = size;
        let mut edit = insert_into_edge(graph, self.edge, mid, &self.config)?;
        edit.affected.point(mid);
        tracing::debug!(edge = ?self.edge, ?mid, "split edge");
        Ok(Edit::new(mid, edit.affected))
    }
}

/// Joins an existing point into the middle of an edge.
///
/// The point is first moved onto the edge, then the edge is split there
/// exactly as [`SplitEdge`] does.
pub struct JoinFromWall {
    point: WallPointId,
    edge: EdgeId,
    config: PlanConfig,
}

impl JoinFromWall {
    /// Creates a new `JoinFromWall` operation.
    #[must_use]
    pub fn new(point: WallPointId, edge: EdgeId) -> Self {
        Self {
            point,
            edge,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the join and returns the edge created for the other half.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the point is already an
    /// endpoint of the edge or is already joined to one of its endpoints.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<EdgeId>> {
        let edge = graph.edge(self.edge)?;
        let (from, to) = (edge.from, edge.to);
        let location = graph.location(self.point)?;
        if edge.touches(self.point) {
            return Err(OperationError::InvalidInput(
                "point is already an endpoint of the edge".to_owned(),
            )
            .into());
        }
        if graph.edge_between(self.point, from).is_some()
            || graph.edge_between(self.point, to).is_some()
        {
            return Err(OperationError::InvalidInput(
                "point is already joined to an endpoint of the edge".to_owned(),
            )
            .into());
        }

        let (a, b) = graph.edge_segment(self.edge)?;
        graph.point_mut(self.point)?.location = project_onto_segment(&location, &a, &b);
        let mut edit = insert_into_edge(graph, self.edge, self.point, &self.config)?;
        edit.affected.point(self.point);
        tracing::debug!(edge = ?self.edge, point = ?self.point, "joined point into edge");
        Ok(edit)
    }
}

/// Rewires `edge` through `mid`, which must already sit on the edge.
///
/// The original edge keeps the longer half. Returns the new edge.
fn insert_into_edge(
    graph: &mut WallGraph,
    edge: EdgeId,
    mid: WallPointId,
    config: &PlanConfig,
) -> Result<Edit<EdgeId>> {
    let data = graph.edge(edge)?;
    let (from, to) = (data.from, data.to);
    let kind = data.kind.fresh_copy();
    let parts = data.parts().to_vec();
    let (a, b) = graph.edge_segment(edge)?;
    let fraction = segment_fraction(&graph.location(mid)?, &a, &b);

    let new_edge = if fraction < 0.5 {
        graph.retarget_edge(edge, EdgeEnd::From, mid)?;
        graph.add_edge(from, mid, kind)?
    } else {
        graph.retarget_edge(edge, EdgeEnd::To, mid)?;
        graph.add_edge(mid, to, kind)?
    };

    let mut affected = Affected::new();
    affected.edge(edge).edge(new_edge).point(from).point(to);

    for part in parts {
        let edit = FindWallPartParent::new(part)
            .with_config(*config)
            .execute(graph)?;
        affected.merge(edit.affected);
    }

    for room in shared_rooms(graph, from, to)? {
        let extended = ExtendRoom::new(room, mid).execute(graph)?;
        if extended.value {
            affected.merge(extended.affected);
        } else {
            affected.merge(ValidateRoom::new(room).execute(graph)?.affected);
        }
    }
    Ok(Edit::new(new_edge, affected))
}

/// Rooms both points are members of.
pub(super) fn shared_rooms(graph: &WallGraph, a: WallPointId, b: WallPointId) -> Result<Vec<RoomId>> {
    let other = &graph.point(b)?.rooms;
    Ok(graph
        .point(a)?
        .rooms
        .iter()
        .copied()
        .filter(|r| other.contains(r))
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, WallPartKind};
    use crate::operations::room::CreateRoom;
    use crate::operations::wall_part::AttachWallPart;
    use approx::assert_abs_diff_eq;

    #[test]
    fn split_keeps_longer_half() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(200.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::wall(12.0)).unwrap();

        let edit = SplitEdge::new(e, Point2::new(50.0, 7.0)).execute(&mut g).unwrap();
        let mid = edit.value;
        assert_abs_diff_eq!(g.location(mid).unwrap().y, 0.0);
        assert_abs_diff_eq!(g.point(mid).unwrap().size, 12.0);
        assert_abs_diff_eq!(g.edge_length(e).unwrap(), 150.0, epsilon = 1e-9);
        let short = g.edge_between(a, mid).unwrap();
        assert_ne!(short, e);
        assert_abs_diff_eq!(g.edge(short).unwrap().width(), 12.0);
        assert_eq!(g.degree(mid).unwrap(), 2);

        let edit = SplitEdge::new(e, Point2::new(180.0, 0.0)).execute(&mut g).unwrap();
        assert_eq!(g.edge(e).unwrap().to, edit.value);
    }

    #[test]
    fn split_projects_outside_points_onto_segment() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::Divider).unwrap();
        let mid = SplitEdge::new(e, Point2::new(60.0, -40.0))
            .execute(&mut g)
            .unwrap()
            .value;
        assert_abs_diff_eq!(g.location(mid).unwrap().x, 60.0);
        assert!(matches!(g.edge(e).unwrap().kind, EdgeKind::Divider));
        assert_abs_diff_eq!(g.point(mid).unwrap().size, 10.0);
    }

    #[test]
    fn split_reparents_parts() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(400.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        let left = AttachWallPart::new(e, 0.2, WallPartKind::Window)
            .execute(&mut g)
            .unwrap()
            .value;
        let right = AttachWallPart::new(e, 0.8, WallPartKind::Window)
            .execute(&mut g)
            .unwrap()
            .value;

        let mid = SplitEdge::new(e, Point2::new(150.0, 0.0))
            .execute(&mut g)
            .unwrap()
            .value;
        let short = g.edge_between(a, mid).unwrap();
        assert_eq!(g.part(left).unwrap().edge, Some(short));
        assert_eq!(g.part(right).unwrap().edge, Some(e));
        assert_eq!(g.edge(short).unwrap().parts(), &[left]);
        assert_eq!(g.edge(e).unwrap().parts(), &[right]);
        assert_abs_diff_eq!(g.part(left).unwrap().location.x, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn split_extends_shared_room() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let c = g.add_point(Point2::new(100.0, 100.0));
        let e = g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, c, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(c, a, EdgeKind::wall(10.0)).unwrap();
        let room = CreateRoom::new(vec![a, b, c]).execute(&mut g).unwrap().value;

        let mid = SplitEdge::new(e, Point2::new(40.0, 0.0))
            .execute(&mut g)
            .unwrap()
            .value;
        let data = g.room(room).unwrap();
        assert_eq!(data.points.len(), 4);
        assert!(data.points.contains(&mid));
        assert_eq!(g.point(mid).unwrap().rooms, vec![room]);
    }

    #[test]
    fn join_from_wall_moves_point_onto_edge() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let p = g.add_point(Point2::new(70.0, 3.0));
        let q = g.add_point(Point2::new(70.0, 100.0));
        let e = g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(p, q, EdgeKind::wall(10.0)).unwrap();

        let edit = JoinFromWall::new(p, e).execute(&mut g).unwrap();
        assert_abs_diff_eq!(g.location(p).unwrap().y, 0.0);
        assert_eq!(g.degree(p).unwrap(), 3);
        assert_eq!(g.edge(edit.value).unwrap().to, b);
        assert_eq!(g.edge(e).unwrap().to, p);

        assert!(JoinFromWall::new(a, e).execute(&mut g).is_err());
    }
}
