use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::graph::{EdgeId, WallGraph};
use crate::operations::miter::UpdatePointSize;
use crate::operations::{Affected, Edit};

/// Changes a wall's width by a delta, clamped to the allowed range.
///
/// Endpoint sizes and the thickness of attached parts follow immediately;
/// miters and room areas are left to the recompute pipeline.
pub struct ResizeWall {
    edge: EdgeId,
    delta: f64,
    config: PlanConfig,
}

impl ResizeWall {
    /// Creates a new `ResizeWall` operation.
    #[must_use]
    pub fn new(edge: EdgeId, delta: f64) -> Self {
        Self {
            edge,
            delta,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the resize and returns the new width.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-finite delta and
    /// `TopologyError::NotAWall` if the edge is not a wall.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<f64>> {
        if !self.delta.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "width change must be finite, got {}",
                self.delta
            ))
            .into());
        }
        let wall = graph.wall_mut(self.edge)?;
        let width = (wall.width + self.delta).clamp(self.config.min_wall_width, self.config.max_wall_width);
        wall.width = width;
        let parts = wall.parts.clone();

        let mut affected = Affected::new();
        affected.edge(self.edge);
        let data = graph.edge(self.edge)?;
        for end in [data.from, data.to] {
            UpdatePointSize::new(end)
                .with_config(self.config)
                .execute(graph)?;
            affected.point(end);
        }
        for part in parts {
            graph.part_mut(part)?.thickness = width;
            affected.part(part);
        }
        tracing::debug!(edge = ?self.edge, width, "resized wall");
        Ok(Edit::new(width, affected))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, WallPartKind};
    use crate::math::Point2;
    use crate::operations::wall_part::AttachWallPart;
    use approx::assert_abs_diff_eq;

    #[test]
    fn resize_clamps_and_updates_neighbours() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(200.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        let part = AttachWallPart::new(e, 0.5, WallPartKind::Window)
            .execute(&mut g)
            .unwrap()
            .value;

        let width = ResizeWall::new(e, 8.0).execute(&mut g).unwrap().value;
        assert_abs_diff_eq!(width, 18.0);
        assert_abs_diff_eq!(g.point(a).unwrap().size, 18.0);
        assert_abs_diff_eq!(g.part(part).unwrap().thickness, 18.0);

        assert_abs_diff_eq!(ResizeWall::new(e, 100.0).execute(&mut g).unwrap().value, 42.0);
        assert_abs_diff_eq!(ResizeWall::new(e, -100.0).execute(&mut g).unwrap().value, 2.0);
        // Thin walls still leave a visible junction.
        assert_abs_diff_eq!(g.point(b).unwrap().size, 6.0);
    }

    #[test]
    fn dividers_cannot_be_resized() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(200.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::Divider).unwrap();
        assert!(ResizeWall::new(e, 2.0).execute(&mut g).is_err());
    }

    #[test]
    fn non_finite_delta_is_rejected() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(200.0, 0.0));
        let e = g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(ResizeWall::new(e, delta).execute(&mut g).is_err());
        }
        assert_abs_diff_eq!(g.wall(e).unwrap().width, 10.0);
    }
}
