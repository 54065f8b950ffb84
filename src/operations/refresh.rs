use std::collections::BTreeSet;

use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{EdgeId, RoomId, WallGraph, WallPartId, WallPointId};

use super::affected::Affected;
use super::miter::{MiterJunction, UpdatePointSize};
use super::room::RecomputeRoom;
use super::wall_part::ReanchorWallPart;

/// Brings derived state back in line after a structural edit.
///
/// Runs, in order: point sizes, junction miters, room geometry, and wall
/// part placement, each over the neighbourhood of what the edit touched.
/// Every write here is derived; the returned set lists them.
pub struct Refresh<'a> {
    affected: &'a Affected,
    config: PlanConfig,
}

impl<'a> Refresh<'a> {
    /// Creates a new `Refresh` over the entities an edit touched.
    #[must_use]
    pub fn new(affected: &'a Affected) -> Self {
        Self {
            affected,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the pipeline and returns the derived writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph references a missing entity.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Affected> {
        let touched = self.touched_points(graph)?;
        let mut derived = Affected::new();

        for &p in &touched {
            UpdatePointSize::new(p)
                .with_config(self.config)
                .execute(graph)?;
            derived.point(p);
        }

        let mut mitered = touched.clone();
        let mut walls: BTreeSet<EdgeId> = BTreeSet::new();
        for &p in &touched {
            for &e in graph.incident_edges(p)? {
                let edge = graph.edge(e)?;
                if edge.kind.is_wall() {
                    walls.insert(e);
                    if let Some(far) = edge.other(p) {
                        mitered.insert(far);
                    }
                }
            }
        }
        for &p in &mitered {
            MiterJunction::new(p)
                .with_config(self.config)
                .execute(graph)?;
            derived.point(p);
        }

        let mut rooms: BTreeSet<RoomId> = self
            .affected
            .rooms
            .iter()
            .copied()
            .filter(|&r| graph.contains_room(r))
            .collect();
        for &p in &mitered {
            rooms.extend(graph.point(p)?.rooms.iter().copied());
        }
        for &r in &rooms {
            RecomputeRoom::new(r).execute(graph)?;
            derived.room(r);
        }

        walls.extend(
            self.affected
                .edges
                .iter()
                .copied()
                .filter(|&e| graph.edge(e).is_ok_and(|d| d.kind.is_wall())),
        );
        let mut parts: BTreeSet<WallPartId> = self
            .affected
            .parts
            .iter()
            .copied()
            .filter(|&p| graph.contains_part(p))
            .collect();
        for &e in &walls {
            parts.extend(graph.wall(e)?.parts.iter().copied());
        }
        for &part in &parts {
            ReanchorWallPart::new(part)
                .with_config(self.config)
                .execute(graph)?;
            derived.part(part);
        }

        tracing::trace!(
            points = mitered.len(),
            rooms = rooms.len(),
            parts = parts.len(),
            "refreshed derived state"
        );
        Ok(derived)
    }

    /// Live points the edit touched, directly or as an endpoint of a
    /// touched edge.
    fn touched_points(&self, graph: &WallGraph) -> Result<BTreeSet<WallPointId>> {
        let mut touched: BTreeSet<WallPointId> = self
            .affected
            .points
            .iter()
            .copied()
            .filter(|&p| graph.contains_point(p))
            .collect();
        for &e in &self.affected.edges {
            if graph.contains_edge(e) {
                let edge = graph.edge(e)?;
                touched.insert(edge.from);
                touched.insert(edge.to);
            }
        }
        Ok(touched)
    }
}
