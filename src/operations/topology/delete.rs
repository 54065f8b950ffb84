use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{EdgeId, WallGraph, WallPointId};
use crate::operations::room::{DeleteRoom, ValidateRoom};
use crate::operations::wall_part::DeleteWallPart;
use crate::operations::{Affected, Edit, EntityKey};

use super::join::JoinStraightWalls;
use super::split::shared_rooms;

/// Deletes an edge together with its wall parts.
///
/// Afterwards each endpoint that is left between two collinear walls is
/// collapsed, and rooms bounded by both endpoints are revalidated (and
/// deleted if they no longer close).
pub struct DeleteEdge {
    edge: EdgeId,
    config: PlanConfig,
}

impl DeleteEdge {
    /// Creates a new `DeleteEdge` operation.
    #[must_use]
    pub fn new(edge: EdgeId) -> Self {
        Self {
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

    /// Executes the deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its endpoints is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let affected = delete_edge(graph, self.edge, &self.config, None)?;
        Ok(Edit::new((), affected))
    }
}

/// Deletes a wall point with every edge ending at it and every room it
/// bounds.
pub struct DeletePoint {
    point: WallPointId,
    config: PlanConfig,
}

impl DeletePoint {
    /// Creates a new `DeletePoint` operation.
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

    /// Executes the deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or something it references is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let rooms = graph.point(self.point)?.rooms.clone();
        let edges = graph.incident_edges(self.point)?.to_vec();

        let mut affected = Affected::new();
        for room in rooms {
            affected.merge(DeleteRoom::new(room).execute(graph)?.affected);
        }
        for edge in edges {
            // Earlier joins at the far ends can replace an edge of ours.
            if graph.contains_edge(edge) {
                affected.merge(delete_edge(graph, edge, &self.config, Some(self.point))?);
            }
        }
        // A far-end join may have rerouted a wall onto this point.
        for edge in graph.incident_edges(self.point)?.to_vec() {
            affected.merge(delete_edge(graph, edge, &self.config, Some(self.point))?);
        }
        graph.remove_point(self.point)?;
        affected.removed(EntityKey::Point(self.point));
        tracing::debug!(point = ?self.point, "deleted wall point");
        Ok(Edit::new((), affected))
    }
}

/// Deletion cascade shared by [`DeleteEdge`] and [`DeletePoint`]. `spare` is
/// an endpoint that must not be collapsed because it is going away anyway.
fn delete_edge(
    graph: &mut WallGraph,
    edge: EdgeId,
    config: &PlanConfig,
    spare: Option<WallPointId>,
) -> Result<Affected> {
    let data = graph.edge(edge)?;
    let (from, to) = (data.from, data.to);
    let parts = data.parts().to_vec();
    let rooms = shared_rooms(graph, from, to)?;

    let mut affected = Affected::new();
    for part in parts {
        affected.merge(DeleteWallPart::new(part).execute(graph)?.affected);
    }
    graph.remove_edge(edge)?;
    affected.removed(EntityKey::Edge(edge));
    affected.point(from).point(to);

    for end in [from, to] {
        if Some(end) == spare || !graph.contains_point(end) {
            continue;
        }
        let joined = JoinStraightWalls::new(end).with_config(*config).execute(graph)?;
        affected.merge(joined.affected);
    }
    for room in rooms {
        if graph.contains_room(room) {
            affected.merge(ValidateRoom::new(room).execute(graph)?.affected);
        }
    }
    tracing::debug!(?edge, "deleted edge");
    Ok(affected)
}
