use crate::config::PlanConfig;
use crate::error::Result;
use crate::graph::{EdgeId, WallGraph, WallPartId, WallPartKind};
use crate::math::angle_2d::direction_angle;
use crate::math::distance_2d::{point_at_fraction, FractionBuffer};

/// Allowed fraction range for a part of `part_length` on `edge`, keeping it
/// clear of both endpoint junctions.
///
/// # Errors
///
/// Returns an error if the edge or one of its endpoints is missing.
pub fn part_buffer(graph: &WallGraph, edge: EdgeId, part_length: f64) -> Result<FractionBuffer> {
    let data = graph.edge(edge)?;
    let from_size = graph.point(data.from)?.size;
    let to_size = graph.point(data.to)?.size;
    Ok(FractionBuffer::new(
        graph.edge_length(edge)?,
        from_size,
        to_size,
        part_length,
    ))
}

/// Places a wall part on its wall from its stored fraction.
///
/// The part's length is fitted to the wall's usable length (never below the
/// configured minimum), its thickness follows the wall width and its
/// rotation follows the wall direction. Orphaned parts are left alone.
pub struct ReanchorWallPart {
    part: WallPartId,
    config: PlanConfig,
}

impl ReanchorWallPart {
    /// Creates a new `ReanchorWallPart` operation with default parameters.
    #[must_use]
    pub fn new(part: WallPartId) -> Self {
        Self {
            part,
            config: PlanConfig::default(),
        }
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the re-anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the part, its wall or a wall endpoint is missing.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<()> {
        let part = graph.part(self.part)?;
        let Some(edge) = part.edge else {
            return Ok(());
        };
        let (fraction, prev_length) = (part.fraction, part.length);

        let data = graph.edge(edge)?;
        let thickness = data.width();
        let ends = graph.point(data.from)?.size / 2.0 + graph.point(data.to)?.size / 2.0;
        let (a, b) = graph.edge_segment(edge)?;
        let usable = (b - a).norm() - ends;
        let length = prev_length.min(usable).max(self.config.min_part_length);

        let part = graph.part_mut(self.part)?;
        part.length = length;
        part.thickness = thickness;
        part.location = point_at_fraction(&a, &b, fraction);
        part.rotation = direction_angle(&a, &b);
        if let WallPartKind::Door(door) = &mut part.kind {
            door.sweep_offset = if door.sweep_offset >= 0.0 {
                length / 2.0
            } else {
                -length / 2.0
            };
        }
        tracing::trace!(?edge, fraction, length, "re-anchored wall part");
        Ok(())
    }
}
