use crate::error::{OperationError, Result};
use crate::graph::{EdgeEnd, EdgeId, WallGraph, WallPointId};
use crate::math::{ensure_finite, Point2};
use crate::operations::room::RevalidateRoomsForPoint;
use crate::operations::{Affected, Edit, EntityKey};

/// Moves a wall point to a new location.
///
/// Only the location is written; miters, rooms and wall parts around the
/// point are left to the recompute pipeline.
pub struct MovePoint {
    point: WallPointId,
    to: Point2,
}

impl MovePoint {
    /// Creates a new `MovePoint` operation.
    #[must_use]
    pub fn new(point: WallPointId, to: Point2) -> Self {
        Self { point, to }
    }

    /// Executes the move.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for a non-finite location.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        ensure_finite(self.to)?;
        graph.point_mut(self.point)?.location = self.to;
        let mut affected = Affected::new();
        affected.point(self.point);
        Ok(Edit::new((), affected))
    }
}

/// Drops a dangling wall end onto another point.
///
/// The dragged point must end exactly one wall or divider. That edge is
/// rerouted to `target`, rooms swap the dragged point for the target, and
/// the dragged point is removed.
pub struct MergePoints {
    dragged: WallPointId,
    target: WallPointId,
}

impl MergePoints {
    /// Creates a new `MergePoints` operation.
    #[must_use]
    pub fn new(dragged: WallPointId, target: WallPointId) -> Self {
        Self { dragged, target }
    }

    /// Executes the merge and returns the rerouted edge.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the dragged point does not
    /// end exactly one wall or divider, and `TopologyError::SelfLoop` if the
    /// edge already ends at the target.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<EdgeId>> {
        graph.point(self.target)?;
        let &[edge] = graph.incident_edges(self.dragged)? else {
            return Err(OperationError::InvalidInput(
                "dragged point must end exactly one edge".to_owned(),
            )
            .into());
        };
        let data = graph.edge(edge)?;
        if !data.kind.bounds_rooms() {
            return Err(OperationError::InvalidInput(
                "only walls and dividers can be merged".to_owned(),
            )
            .into());
        }
        let end = if data.from == self.dragged {
            EdgeEnd::From
        } else {
            EdgeEnd::To
        };
        graph.retarget_edge(edge, end, self.target)?;

        let mut affected = Affected::new();
        affected.edge(edge).point(self.target);
        affected.merge(
            RevalidateRoomsForPoint::new(self.dragged)
                .with_replacement(self.target)
                .execute(graph)?
                .affected,
        );
        graph.remove_point(self.dragged)?;
        affected.removed(EntityKey::Point(self.dragged));
        tracing::debug!(dragged = ?self.dragged, target = ?self.target, "merged points");
        Ok(Edit::new(edge, affected))
    }
}
