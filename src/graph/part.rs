use crate::math::Point2;

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a window or door.
    pub struct WallPartId;
}

/// Door-only attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorData {
    /// Swing side mirrored across the wall.
    pub flipped: bool,
    /// Hinge moved to the other jamb.
    pub swapped: bool,
    /// Signed offset of the swing arc; its sign records the hinge side and
    /// its magnitude is half the door length.
    pub sweep_offset: f64,
}

/// What kind of opening a wall part is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallPartKind {
    Window,
    Door(DoorData),
}

impl WallPartKind {
    /// A door with default swing for a leaf of `length`.
    #[must_use]
    pub fn door(length: f64) -> Self {
        Self::Door(DoorData {
            flipped: false,
            swapped: false,
            sweep_offset: length / 2.0,
        })
    }
}

/// A window or door glued to a fractional position along a wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallPartData {
    /// Owning wall; `None` once orphaned.
    pub edge: Option<EdgeId>,
    /// Position along the owning wall, `0` at its `from` end.
    pub fraction: f64,
    /// Extent along the wall.
    pub length: f64,
    /// Extent across the wall; follows the wall width.
    pub thickness: f64,
    /// Document location of the part's centre.
    pub location: Point2,
    /// Rotation of the part's baseline in radians.
    pub rotation: f64,
    pub kind: WallPartKind,
}

impl WallPartData {
    /// Creates a part on `edge` at `fraction`. Placement is filled in by the
    /// first re-anchor.
    #[must_use]
    pub fn new(edge: EdgeId, fraction: f64, length: f64, kind: WallPartKind) -> Self {
        Self {
            edge: Some(edge),
            fraction,
            length,
            thickness: 0.0,
            location: Point2::origin(),
            rotation: 0.0,
            kind,
        }
    }

    #[must_use]
    pub fn is_orphaned(&self) -> bool {
        self.edge.is_none()
    }
}
