use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::graph::{EdgeId, WallGraph, WallPartId};
use crate::math::distance_2d::{
    near_segment_bounds, point_at_fraction, point_to_segment_dist_sq, segment_fraction,
};
use crate::math::Point2;
use crate::operations::{Affected, Edit};

use super::anchor::{part_buffer, ReanchorWallPart};

/// Where a wall part ended up after a reparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Attached(EdgeId),
    /// No wall was in reach; the part has no owner.
    Orphaned,
}

impl Anchor {
    /// The owning wall, or `OperationError::NoEligibleAnchor`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoEligibleAnchor` for an orphaned part.
    pub fn edge(self) -> Result<EdgeId> {
        match self {
            Self::Attached(e) => Ok(e),
            Self::Orphaned => Err(OperationError::NoEligibleAnchor.into()),
        }
    }
}

/// Moves a wall part to the nearest wall that can hold it.
///
/// Every wall within the search radius is tried with the part's fraction
/// clamped to that wall's buffer range; the closest resulting position
/// wins, provided it lies within the squared cutoff distance. With no
/// candidate the part is detached and left orphaned.
pub struct FindWallPartParent {
    part: WallPartId,
    location: Option<Point2>,
    config: PlanConfig,
}

impl FindWallPartParent {
    /// Searches around the part's current location.
    #[must_use]
    pub fn new(part: WallPartId) -> Self {
        Self {
            part,
            location: None,
            config: PlanConfig::default(),
        }
    }

    /// Searches around `location` instead, e.g. where the part was dropped.
    #[must_use]
    pub fn at(mut self, location: Point2) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<Anchor>> {
        let part = graph.part(self.part)?;
        let old = part.edge;
        let length = part.length;
        let location = self.location.unwrap_or(part.location);

        let radius_sq = self.config.part_search_radius * self.config.part_search_radius;
        let mut best: Option<(EdgeId, f64, f64)> = None;
        for (edge, data) in graph.edges() {
            if !data.kind.is_wall() {
                continue;
            }
            let (a, b) = graph.edge_segment(edge)?;
            if !near_segment_bounds(&location, &a, &b, self.config.part_search_radius)
                || point_to_segment_dist_sq(&location, &a, &b) > radius_sq
            {
                continue;
            }
            let fraction = part_buffer(graph, edge, length)?.clamp(segment_fraction(&location, &a, &b));
            let dist = (point_at_fraction(&a, &b, fraction) - location).norm_squared();
            if dist < self.config.part_max_distance_sq && best.map_or(true, |(_, _, d)| dist < d) {
                best = Some((edge, fraction, dist));
            }
        }

        let mut affected = Affected::new();
        affected.part(self.part);
        let Some((edge, fraction, _)) = best else {
            if let Some(old) = old {
                detach(graph, old, self.part);
                if graph.contains_edge(old) {
                    affected.edge(old);
                }
            }
            graph.part_mut(self.part)?.edge = None;
            tracing::debug!(part = ?self.part, "no wall in reach; wall part orphaned");
            return Ok(Edit::new(Anchor::Orphaned, affected));
        };

        if let Some(old) = old.filter(|&o| o != edge) {
            detach(graph, old, self.part);
            if graph.contains_edge(old) {
                affected.edge(old);
            }
        }
        let parts = &mut graph.wall_mut(edge)?.parts;
        if !parts.contains(&self.part) {
            parts.push(self.part);
        }
        let data = graph.part_mut(self.part)?;
        data.edge = Some(edge);
        data.fraction = fraction;
        ReanchorWallPart::new(self.part)
            .with_config(self.config)
            .execute(graph)?;

        tracing::trace!(part = ?self.part, ?edge, fraction, "reparented wall part");
        affected.edge(edge);
        Ok(Edit::new(Anchor::Attached(edge), affected))
    }
}

fn detach(graph: &mut WallGraph, edge: EdgeId, part: WallPartId) {
    if let Ok(wall) = graph.wall_mut(edge) {
        wall.parts.retain(|p| *p != part);
    }
}

/// Slides a wall part along its wall toward a document location.
///
/// The fraction is optionally snapped to the configured grid step and then
/// clamped into the buffer range. If the part would end up beyond the
/// cutoff distance from `to`, or it has no wall, it is reparented instead.
pub struct SlideWallPart {
    part: WallPartId,
    to: Point2,
    snap: bool,
    config: PlanConfig,
}

impl SlideWallPart {
    /// Creates a new `SlideWallPart` operation with grid snapping on.
    #[must_use]
    pub fn new(part: WallPartId, to: Point2) -> Self {
        Self {
            part,
            to,
            snap: true,
            config: PlanConfig::default(),
        }
    }

    /// Turns grid snapping on or off.
    #[must_use]
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the part is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<Anchor>> {
        let part = graph.part(self.part)?;
        let length = part.length;
        let Some(edge) = part.edge.filter(|&e| graph.contains_edge(e)) else {
            return self.reparent(graph);
        };

        let (a, b) = graph.edge_segment(edge)?;
        let edge_len = (b - a).norm();
        let mut fraction = segment_fraction(&self.to, &a, &b);
        let steps = edge_len / self.config.grid_size;
        if self.snap && steps > 0.0 {
            fraction = (fraction * steps).round() / steps;
        }
        let fraction = part_buffer(graph, edge, length)?.clamp(fraction);
        let dist = (point_at_fraction(&a, &b, fraction) - self.to).norm_squared();
        if dist >= self.config.part_max_distance_sq {
            return self.reparent(graph);
        }

        graph.part_mut(self.part)?.fraction = fraction;
        ReanchorWallPart::new(self.part)
            .with_config(self.config)
            .execute(graph)?;
        let mut affected = Affected::new();
        affected.part(self.part).edge(edge);
        Ok(Edit::new(Anchor::Attached(edge), affected))
    }

    fn reparent(&self, graph: &mut WallGraph) -> Result<Edit<Anchor>> {
        FindWallPartParent::new(self.part)
            .at(self.to)
            .with_config(self.config)
            .execute(graph)
    }
}
