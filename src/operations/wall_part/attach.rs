use crate::config::PlanConfig;
use crate::error::{OperationError, Result};
use crate::graph::{EdgeId, WallGraph, WallPartData, WallPartId, WallPartKind};
use crate::operations::{Affected, Edit, EntityKey};

use super::anchor::{part_buffer, ReanchorWallPart};

/// Attaches a new window or door to a wall at a fraction along it.
///
/// The fraction is clamped so the part stays clear of both endpoint
/// junctions.
pub struct AttachWallPart {
    edge: EdgeId,
    fraction: f64,
    kind: WallPartKind,
    length: Option<f64>,
    config: PlanConfig,
}

impl AttachWallPart {
    /// Creates a new `AttachWallPart` operation.
    #[must_use]
    pub fn new(edge: EdgeId, fraction: f64, kind: WallPartKind) -> Self {
        Self {
            edge,
            fraction,
            kind,
            length: None,
            config: PlanConfig::default(),
        }
    }

    /// Overrides the configured default part length.
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the plan parameters.
    #[must_use]
    pub fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the attachment and returns the new part.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotAWall` if the edge is not a wall, and
    /// `OperationError::InvalidInput` for a non-finite fraction or a
    /// non-positive length.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<WallPartId>> {
        graph.wall(self.edge)?;
        let length = self.length.unwrap_or(self.config.default_part_length);
        if !self.fraction.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "wall part fraction must be finite, got {}",
                self.fraction
            ))
            .into());
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "wall part length must be positive, got {length}"
            ))
            .into());
        }

        let fraction = part_buffer(graph, self.edge, length)?.clamp(self.fraction);
        let part = graph.add_part(WallPartData::new(self.edge, fraction, length, self.kind));
        graph.wall_mut(self.edge)?.parts.push(part);
        ReanchorWallPart::new(part)
            .with_config(self.config)
            .execute(graph)?;

        tracing::debug!(?part, edge = ?self.edge, fraction, "attached wall part");
        let mut affected = Affected::new();
        affected.part(part).edge(self.edge);
        Ok(Edit::new(part, affected))
    }
}

/// Deletes a wall part and unlinks it from its wall.
pub struct DeleteWallPart {
    part: WallPartId,
}

impl DeleteWallPart {
    #[must_use]
    pub fn new(part: WallPartId) -> Self {
        Self { part }
    }

    /// Executes the deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the part does not exist.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let owner = graph.part(self.part)?.edge;
        let mut affected = Affected::new();
        if let Some(edge) = owner {
            if let Ok(wall) = graph.wall_mut(edge) {
                wall.parts.retain(|p| *p != self.part);
                affected.edge(edge);
            }
        }
        graph.remove_part(self.part)?;
        affected.removed(EntityKey::Part(self.part));
        tracing::debug!(part = ?self.part, "deleted wall part");
        Ok(Edit::new((), affected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DoorToggle {
    Swing,
    Hinge,
}

/// Mirrors a door's swing across its wall, or moves its hinge to the
/// other jamb.
pub struct FlipDoor {
    part: WallPartId,
    toggle: DoorToggle,
}

impl FlipDoor {
    /// Flips the swing side.
    #[must_use]
    pub fn new(part: WallPartId) -> Self {
        Self {
            part,
            toggle: DoorToggle::Swing,
        }
    }

    /// Swaps the hinge side.
    #[must_use]
    pub fn hinge(part: WallPartId) -> Self {
        Self {
            part,
            toggle: DoorToggle::Hinge,
        }
    }

    /// Executes the toggle.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the part is not a door.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<()>> {
        let WallPartKind::Door(door) = &mut graph.part_mut(self.part)?.kind else {
            return Err(OperationError::InvalidInput("wall part is not a door".to_owned()).into());
        };
        match self.toggle {
            DoorToggle::Swing => {
                door.flipped = !door.flipped;
                door.sweep_offset = -door.sweep_offset;
            }
            DoorToggle::Hinge => door.swapped = !door.swapped,
        }
        let mut affected = Affected::new();
        affected.part(self.part);
        Ok(Edit::new((), affected))
    }
}
