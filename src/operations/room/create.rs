use std::collections::HashSet;

use crate::error::{OperationError, Result};
use crate::graph::{RoomData, RoomId, WallGraph, WallPointId};
use crate::operations::{Affected, Edit};

use super::loop_search::attempt_loop;
use super::shape::RecomputeRoom;

/// Fill colour given to new rooms.
pub const DEFAULT_ROOM_FILL: &str = "burlywood";

/// Creates a room from a set of candidate wall points.
///
/// The cycle search runs from each candidate in order until one closes; the
/// room takes that cycle as its boundary. Candidates off the cycle are not
/// included.
pub struct CreateRoom {
    candidates: Vec<WallPointId>,
    fill: String,
}

impl CreateRoom {
    /// Creates a new `CreateRoom` operation.
    #[must_use]
    pub fn new(candidates: Vec<WallPointId>) -> Self {
        Self {
            candidates,
            fill: DEFAULT_ROOM_FILL.to_owned(),
        }
    }

    /// Sets the room's fill colour.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoValidLoop` if fewer than three distinct
    /// candidates are given or no cycle closes among them, and
    /// `EntityNotFound` for unknown points. The graph is untouched on error.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<RoomId>> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(self.candidates.len());
        for &p in &self.candidates {
            graph.point(p)?;
            if seen.insert(p) {
                ordered.push(p);
            }
        }
        if ordered.len() < 3 {
            return Err(OperationError::NoValidLoop.into());
        }

        let boundary = ordered
            .iter()
            .find_map(|&start| attempt_loop(graph, start, &seen))
            .ok_or(OperationError::NoValidLoop)?;

        let room = graph.add_room(RoomData::new(boundary.clone(), self.fill.clone()));
        let mut affected = Affected::new();
        affected.room(room);
        for &p in &boundary {
            graph.point_mut(p)?.link_room(room);
            affected.point(p);
        }
        RecomputeRoom::new(room).execute(graph)?;

        tracing::debug!(?room, points = boundary.len(), "created room");
        Ok(Edit::new(room, affected))
    }
}
