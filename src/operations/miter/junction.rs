use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{EdgeKind, WallGraph, WallPointId};

use super::cap::{compute_junction, WallArm};

/// Recomputes the mitered junction shape of one wall point and stores it,
/// together with its corner points, on the point.
pub struct MiterJunction {
    point: WallPointId,
    config: PlanConfig,
}

impl MiterJunction {
    /// Creates a new `MiterJunction` operation with default parameters.
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

    /// Executes the miter pass for the point.
    ///
    /// Only walls shape the junction; a divider only affects seam
    /// visibility and measurements are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or one of its edges is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<()> {
        let location = graph.location(self.point)?;
        let mut arms = Vec::new();
        let mut has_divider = false;
        for &edge in graph.incident_edges(self.point)? {
            match &graph.edge(edge)?.kind {
                EdgeKind::Wall(wall) => arms.push(WallArm {
                    edge,
                    angle: graph.edge_angle_from(edge, self.point)?,
                    half_width: wall.width / 2.0,
                    length: graph.edge_length(edge)?,
                }),
                EdgeKind::Divider => has_divider = true,
                EdgeKind::Measurement => {}
            }
        }

        let result = compute_junction(location, &arms, has_divider, &self.config);
        tracing::trace!(
            walls = arms.len(),
            corners = result.corners.len(),
            straight = result.geometry.straight,
            "mitered junction"
        );

        let data = graph.point_mut(self.point)?;
        data.junction = result.geometry;
        data.miter_corners = result.corners;
        Ok(())
    }
}

/// Recomputes a wall point's junction thickness from its walls.
pub struct UpdatePointSize {
    point: WallPointId,
    config: PlanConfig,
}

impl UpdatePointSize {
    /// Creates a new `UpdatePointSize` operation with default parameters.
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

    /// Executes the update, returning the new size.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or one of its edges is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<f64> {
        let size = graph
            .max_wall_width(self.point)?
            .map_or(self.config.default_point_size, |w| {
                w.max(self.config.min_point_size)
            });
        graph.point_mut(self.point)?.size = size;
        Ok(size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn miter_stores_corners_on_point() {
        let mut g = WallGraph::new();
        let o = g.add_point(Point2::new(0.0, 0.0));
        let a = g.add_point(Point2::new(100.0, 0.0));
        let b = g.add_point(Point2::new(0.0, 100.0));
        g.add_edge(o, a, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, o, EdgeKind::wall(10.0)).unwrap();

        MiterJunction::new(o).execute(&mut g).unwrap();
        let data = g.point(o).unwrap();
        assert_eq!(data.miter_corners.len(), 2);
        assert!(data.junction.fill.is_some());
    }

    #[test]
    fn measurements_do_not_shape_junctions() {
        let mut g = WallGraph::new();
        let o = g.add_point(Point2::new(0.0, 0.0));
        let a = g.add_point(Point2::new(100.0, 0.0));
        let b = g.add_point(Point2::new(0.0, 100.0));
        g.add_edge(o, a, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(o, b, EdgeKind::Measurement).unwrap();

        MiterJunction::new(o).execute(&mut g).unwrap();
        let data = g.point(o).unwrap();
        // Treated as a lone wall end.
        assert_eq!(data.miter_corners.len(), 2);
        assert!(data.junction.fill.is_none());
    }

    #[test]
    fn isolated_point_clears_corners() {
        let mut g = WallGraph::new();
        let o = g.add_point(Point2::new(0.0, 0.0));
        g.point_mut(o).unwrap().miter_corners = vec![Point2::new(1.0, 1.0)];
        MiterJunction::new(o).execute(&mut g).unwrap();
        assert!(g.point(o).unwrap().miter_corners.is_empty());
        assert!(g.point(o).unwrap().junction.is_hidden());
    }

    #[test]
    fn size_tracks_widest_wall() {
        let mut g = WallGraph::new();
        let o = g.add_point(Point2::new(0.0, 0.0));
        let a = g.add_point(Point2::new(10.0, 0.0));
        let b = g.add_point(Point2::new(0.0, 10.0));
        assert!((UpdatePointSize::new(o).execute(&mut g).unwrap() - 10.0).abs() < 1e-12);
        g.add_edge(o, a, EdgeKind::wall(4.0)).unwrap();
        assert!((UpdatePointSize::new(o).execute(&mut g).unwrap() - 6.0).abs() < 1e-12);
        g.add_edge(o, b, EdgeKind::wall(14.0)).unwrap();
        assert!((UpdatePointSize::new(o).execute(&mut g).unwrap() - 14.0).abs() < 1e-12);
    }
}
