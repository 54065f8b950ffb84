use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{EdgeEnd, EdgeId, WallGraph, WallPointId};
use crate::math::angle_2d::{ccw_sweep, is_opposite};
use crate::operations::room::RevalidateRoomsForPoint;
use crate::operations::wall_part::FindWallPartParent;
use crate::operations::{Affected, Edit, EntityKey};

/// Collapses a point where exactly two collinear walls meet into one wall.
///
/// Nothing happens (the value is `None`) unless the point has exactly two
/// edges, both walls, leaving it in opposite directions and ending at two
/// different points.
pub struct JoinStraightWalls {
    point: WallPointId,
    config: PlanConfig,
}

impl JoinStraightWalls {
    /// Creates a new `JoinStraightWalls` operation.
    #[must_use]
    pub fn new(point: WallPointId) -> Self {
        Self {
            point,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the join and returns the surviving wall, if a join happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or one of its edges is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<Option<EdgeId>>> {
        let Some((keep, drop, far_keep, far_drop)) = self.candidate(graph)? else {
            return Ok(Edit::new(None, Affected::new()));
        };

        // The kept wall now spans both outer points.
        let end = if graph.edge(keep)?.from == self.point {
            EdgeEnd::From
        } else {
            EdgeEnd::To
        };
        graph.retarget_edge(keep, end, far_drop)?;

        let moved = graph.wall(drop)?.parts.clone();
        graph.remove_edge(drop)?;
        let parts = &mut graph.wall_mut(keep)?.parts;
        for &p in &moved {
            if !parts.contains(&p) {
                parts.push(p);
            }
        }
        for &p in &moved {
            graph.part_mut(p)?.edge = Some(keep);
        }
        let all_parts = graph.wall(keep)?.parts.clone();

        let mut affected = Affected::new();
        affected
            .edge(keep)
            .point(far_keep)
            .point(far_drop)
            .removed(EntityKey::Edge(drop));
        affected.merge(RevalidateRoomsForPoint::new(self.point).execute(graph)?.affected);
        graph.remove_point(self.point)?;
        affected.removed(EntityKey::Point(self.point));

        for part in all_parts {
            let edit = FindWallPartParent::new(part)
                .with_config(self.config)
                .execute(graph)?;
            affected.merge(edit.affected);
        }

        tracing::debug!(point = ?self.point, wall = ?keep, "joined straight walls");
        Ok(Edit::new(Some(keep), affected))
    }

    /// The two walls to merge and their far endpoints, if the point qualifies.
    fn candidate(
        &self,
        graph: &WallGraph,
    ) -> Result<Option<(EdgeId, EdgeId, WallPointId, WallPointId)>> {
        let &[first, second] = graph.incident_edges(self.point)? else {
            return Ok(None);
        };
        if !graph.edge(first)?.kind.is_wall() || !graph.edge(second)?.kind.is_wall() {
            return Ok(None);
        }
        let sweep = ccw_sweep(
            graph.edge_angle_from(first, self.point)?,
            graph.edge_angle_from(second, self.point)?,
        );
        if !is_opposite(sweep, self.config.angle_tolerance) {
            return Ok(None);
        }
        let far_first = graph.other_end(first, self.point)?;
        let far_second = graph.other_end(second, self.point)?;
        if far_first == far_second {
            return Ok(None);
        }
        Ok(Some((first, second, far_first, far_second)))
    }
}
