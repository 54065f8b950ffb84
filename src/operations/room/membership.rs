use std::collections::HashSet;

use crate::error::Result;
use crate::graph::{RoomId, WallGraph, WallPointId};
use crate::operations::{Affected, Edit, EntityKey};

use super::loop_search::attempt_covering_loop;
use super::shape::RecomputeRoom;

/// Deletes a room and unlinks it from its member points.
pub struct DeleteRoom {
    room: RoomId,
}

impl DeleteRoom {
    /// Creates a new `DeleteRoom` operation.
    #[must_use]
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Executes the deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let members = graph.room(self.room)?.points.clone();
        let mut affected = Affected::new();
        for p in members {
            // Members may already be gone mid-cascade.
            if let Ok(point) = graph.point_mut(p) {
                point.unlink_room(self.room);
                affected.point(p);
            }
        }
        graph.remove_room(self.room)?;
        affected.removed(EntityKey::Room(self.room));
        tracing::debug!(room = ?self.room, "deleted room");
        Ok(Edit::new((), affected))
    }
}

/// Checks that a room's members still close into one cycle through all of
/// them, re-ordering the boundary if they do and deleting the room if not.
pub struct ValidateRoom {
    room: RoomId,
}

impl ValidateRoom {
    /// Creates a new `ValidateRoom` operation.
    #[must_use]
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Executes the check. The value is `true` if the room survived.
    ///
    /// # Errors
    ///
    /// Returns an error if the room or a member point is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<bool>> {
        let members = graph.room(self.room)?.points.clone();
        let Some(order) = covering_cycle(graph, &members) else {
            let edit = DeleteRoom::new(self.room).execute(graph)?;
            return Ok(Edit::new(false, edit.affected));
        };
        graph.room_mut(self.room)?.points = order;
        RecomputeRoom::new(self.room).execute(graph)?;
        let mut affected = Affected::new();
        affected.room(self.room);
        Ok(Edit::new(true, affected))
    }
}

/// Repairs every room containing a point that is being removed or replaced.
///
/// Each room's boundary drops the point (or swaps in `replacement`) and must
/// then still close through all remaining members; otherwise the room is
/// deleted.
pub struct RevalidateRoomsForPoint {
    point: WallPointId,
    replacement: Option<WallPointId>,
}

impl RevalidateRoomsForPoint {
    /// Revalidation for a point that is going away.
    #[must_use]
    pub fn new(point: WallPointId) -> Self {
        Self {
            point,
            replacement: None,
        }
    }

    /// Substitutes `replacement` for the point instead of dropping it.
    #[must_use]
    pub fn with_replacement(mut self, replacement: WallPointId) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Executes the revalidation.
    ///
    /// # Errors
    ///
    /// Returns an error if the point, the replacement or a room is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let rooms = graph.point(self.point)?.rooms.clone();
        if let Some(r) = self.replacement {
            graph.point(r)?;
        }

        let mut affected = Affected::new();
        for room in rooms {
            let members = graph.room(room)?.points.clone();
            let spliced = self.splice(&members);
            let Some(order) = covering_cycle(graph, &spliced) else {
                tracing::debug!(?room, "room no longer closes");
                affected.merge(DeleteRoom::new(room).execute(graph)?.affected);
                continue;
            };

            graph.room_mut(room)?.points = order;
            graph.point_mut(self.point)?.unlink_room(room);
            affected.point(self.point).room(room);
            if let Some(r) = self.replacement {
                graph.point_mut(r)?.link_room(room);
                affected.point(r);
            }
            RecomputeRoom::new(room).execute(graph)?;
        }
        Ok(Edit::new((), affected))
    }

    fn splice(&self, members: &[WallPointId]) -> Vec<WallPointId> {
        match self.replacement {
            Some(r) if !members.contains(&r) => members
                .iter()
                .map(|&p| if p == self.point { r } else { p })
                .collect(),
            _ => members
                .iter()
                .copied()
                .filter(|&p| p != self.point)
                .collect(),
        }
    }
}

/// Adds a point to a room's boundary when the enlarged member set still
/// closes into one cycle.
pub struct ExtendRoom {
    room: RoomId,
    point: WallPointId,
}

impl ExtendRoom {
    /// Creates a new `ExtendRoom` operation.
    #[must_use]
    pub fn new(room: RoomId, point: WallPointId) -> Self {
        Self { room, point }
    }

    /// Executes the extension. The value is `false`, with nothing changed,
    /// if no cycle covers the enlarged set.
    ///
    /// # Errors
    ///
    /// Returns an error if the room or the point is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<bool>> {
        graph.point(self.point)?;
        let mut members = graph.room(self.room)?.points.clone();
        if !members.contains(&self.point) {
            members.push(self.point);
        }
        let Some(order) = covering_cycle(graph, &members) else {
            return Ok(Edit::new(false, Affected::new()));
        };

        graph.room_mut(self.room)?.points = order;
        graph.point_mut(self.point)?.link_room(self.room);
        RecomputeRoom::new(self.room).execute(graph)?;

        let mut affected = Affected::new();
        affected.room(self.room).point(self.point);
        Ok(Edit::new(true, affected))
    }
}

/// A cycle through every member, starting from the first.
fn covering_cycle(graph: &WallGraph, members: &[WallPointId]) -> Option<Vec<WallPointId>> {
    let &start = members.first()?;
    let eligible: HashSet<_> = members.iter().copied().collect();
    if eligible.len() < 3 {
        return None;
    }
    attempt_covering_loop(graph, start, &eligible)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, RoomData};
    use crate::math::Point2;

    struct Square {
        g: WallGraph,
        pts: Vec<WallPointId>,
        room: RoomId,
    }

    fn square() -> Square {
        let mut g = WallGraph::new();
        let pts: Vec<_> = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
            .iter()
            .map(|&(x, y)| g.add_point(Point2::new(x, y)))
            .collect();
        for i in 0..4 {
            g.add_edge(pts[i], pts[(i + 1) % 4], EdgeKind::wall(10.0))
                .unwrap();
        }
        let room = g.add_room(RoomData::new(pts.clone(), "burlywood"));
        for &p in &pts {
            g.point_mut(p).unwrap().link_room(room);
        }
        Square { g, pts, room }
    }

    #[test]
    fn delete_room_unlinks_members() {
        let Square { mut g, pts, room } = square();
        let edit = DeleteRoom::new(room).execute(&mut g).unwrap();
        assert!(edit.affected.was_removed(EntityKey::Room(room)));
        assert!(!g.contains_room(room));
        for p in pts {
            assert!(g.point(p).unwrap().rooms.is_empty());
        }
    }

    #[test]
    fn validate_keeps_closed_room() {
        let Square { mut g, room, .. } = square();
        let edit = ValidateRoom::new(room).execute(&mut g).unwrap();
        assert!(edit.value);
        assert!((g.room(room).unwrap().area - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn validate_deletes_broken_room() {
        let Square { mut g, pts, room } = square();
        let e = g.edge_between(pts[0], pts[1]).unwrap();
        g.remove_edge(e).unwrap();
        let edit = ValidateRoom::new(room).execute(&mut g).unwrap();
        assert!(!edit.value);
        assert!(!g.contains_room(room));
        assert!(g.point(pts[2]).unwrap().rooms.is_empty());
    }

    #[test]
    fn removing_a_corner_deletes_room() {
        let Square { mut g, pts, room } = square();
        // Without a chord the remaining three points cannot close.
        RevalidateRoomsForPoint::new(pts[0]).execute(&mut g).unwrap();
        assert!(!g.contains_room(room));
        for p in pts {
            assert!(!g.point(p).unwrap().in_room(room));
        }
    }

    #[test]
    fn removing_a_corner_with_chord_keeps_room() {
        let Square { mut g, pts, room } = square();
        g.add_edge(pts[1], pts[3], EdgeKind::Divider).unwrap();
        RevalidateRoomsForPoint::new(pts[0]).execute(&mut g).unwrap();
        let data = g.room(room).unwrap();
        assert_eq!(data.points.len(), 3);
        assert!(!data.points.contains(&pts[0]));
        assert!(!g.point(pts[0]).unwrap().in_room(room));
        assert!((data.area - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn replacement_takes_over_membership() {
        let Square { mut g, pts, room } = square();
        // A new corner wired in where pts[0] was.
        let q = g.add_point(Point2::new(-10.0, -10.0));
        g.add_edge(q, pts[1], EdgeKind::wall(10.0)).unwrap();
        g.add_edge(pts[3], q, EdgeKind::wall(10.0)).unwrap();
        RevalidateRoomsForPoint::new(pts[0])
            .with_replacement(q)
            .execute(&mut g)
            .unwrap();
        let data = g.room(room).unwrap();
        assert_eq!(data.points.len(), 4);
        assert!(data.points.contains(&q));
        assert!(g.point(q).unwrap().in_room(room));
        assert!(!g.point(pts[0]).unwrap().in_room(room));
    }

    #[test]
    fn extend_with_split_point() {
        let Square { mut g, pts, room } = square();
        let e = g.edge_between(pts[0], pts[1]).unwrap();
        g.remove_edge(e).unwrap();
        let mid = g.add_point(Point2::new(50.0, 0.0));
        g.add_edge(pts[0], mid, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(mid, pts[1], EdgeKind::wall(10.0)).unwrap();

        let edit = ExtendRoom::new(room, mid).execute(&mut g).unwrap();
        assert!(edit.value);
        let data = g.room(room).unwrap();
        assert_eq!(data.points.len(), 5);
        assert!(g.point(mid).unwrap().in_room(room));
        assert!((data.area - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn extend_with_unconnected_point_is_rejected() {
        let Square { mut g, room, .. } = square();
        let stray = g.add_point(Point2::new(500.0, 500.0));
        let edit = ExtendRoom::new(room, stray).execute(&mut g).unwrap();
        assert!(!edit.value);
        assert_eq!(g.room(room).unwrap().points.len(), 4);
        assert!(g.point(stray).unwrap().rooms.is_empty());
    }
}
