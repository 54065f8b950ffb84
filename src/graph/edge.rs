use super::part::WallPartId;
use super::point::WallPointId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the wall graph.
    pub struct EdgeId;
}

/// Which end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    From,
    To,
}

/// Data carried only by walls.
#[derive(Debug, Clone, PartialEq)]
pub struct WallData {
    /// Wall thickness.
    pub width: f64,
    /// Attached windows and doors, in attachment order.
    pub parts: Vec<WallPartId>,
}

/// The edge variant and its category-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    /// A thick wall that can hold windows and doors.
    Wall(WallData),
    /// A zero-width room separator.
    Divider,
    /// A dimension line; never part of junctions or rooms.
    Measurement,
}

impl EdgeKind {
    /// A wall of the given width with no parts.
    #[must_use]
    pub fn wall(width: f64) -> Self {
        Self::Wall(WallData {
            width,
            parts: Vec::new(),
        })
    }

    /// The same kind with fresh category data (no parts).
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        match self {
            Self::Wall(w) => Self::wall(w.width),
            Self::Divider => Self::Divider,
            Self::Measurement => Self::Measurement,
        }
    }

    #[must_use]
    pub fn is_wall(&self) -> bool {
        matches!(self, Self::Wall(_))
    }

    /// Walls and dividers bound rooms; measurements do not.
    #[must_use]
    pub fn bounds_rooms(&self) -> bool {
        matches!(self, Self::Wall(_) | Self::Divider)
    }

    #[must_use]
    pub fn as_wall(&self) -> Option<&WallData> {
        match self {
            Self::Wall(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_wall_mut(&mut self) -> Option<&mut WallData> {
        match self {
            Self::Wall(w) => Some(w),
            _ => None,
        }
    }
}

/// A connection between two distinct wall points.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub from: WallPointId,
    pub to: WallPointId,
    pub kind: EdgeKind,
}

impl EdgeData {
    /// The endpoint at `end`.
    #[must_use]
    pub fn end(&self, end: EdgeEnd) -> WallPointId {
        match end {
            EdgeEnd::From => self.from,
            EdgeEnd::To => self.to,
        }
    }

    /// The endpoint opposite `point`, or `None` if `point` is not an endpoint.
    #[must_use]
    pub fn other(&self, point: WallPointId) -> Option<WallPointId> {
        if self.from == point {
            Some(self.to)
        } else if self.to == point {
            Some(self.from)
        } else {
            None
        }
    }

    #[must_use]
    pub fn touches(&self, point: WallPointId) -> bool {
        self.from == point || self.to == point
    }

    /// Wall width, or zero for dividers and measurements.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.kind.as_wall().map_or(0.0, |w| w.width)
    }

    /// Attached parts; empty for non-walls.
    #[must_use]
    pub fn parts(&self) -> &[WallPartId] {
        self.kind.as_wall().map_or(&[], |w| w.parts.as_slice())
    }
}
