use super::path::Path2;
use crate::math::Vector2;

/// A normalized path plus the position of its owner's location inside it.
///
/// The path's bounding box minimum sits at the origin; `origin` is where the
/// wall point's own location falls in that frame, so a renderer places the
/// path at `location - origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPath {
    pub path: Path2,
    pub origin: Vector2,
}

impl PlacedPath {
    /// Normalizes `path` and records the displacement as its origin.
    #[must_use]
    pub fn normalized(mut path: Path2) -> Self {
        let origin = path.normalize();
        Self { path, origin }
    }
}

/// Rendered shape of a wall junction.
///
/// `fill` and `outline` share one frame. Any missing part is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionGeometry {
    /// Closed cap filling the corner where walls meet.
    pub fill: Option<PlacedPath>,
    /// Strokes along the wall faces of the cap; stub ends are jumps.
    pub outline: Option<PlacedPath>,
    /// Tick marks from the centre out to each corner, or the end cap line
    /// of a lone wall.
    pub seam: Option<PlacedPath>,
    /// Exactly two walls pass straight through the point.
    pub straight: bool,
    /// Whether the seam should be drawn.
    pub seam_visible: bool,
}

impl Default for JunctionGeometry {
    fn default() -> Self {
        Self::hidden()
    }
}

impl JunctionGeometry {
    /// A junction with nothing to draw.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            fill: None,
            outline: None,
            seam: None,
            straight: false,
            seam_visible: false,
        }
    }

    /// Returns `true` if no part of the junction is drawn.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.fill.is_none() && (self.seam.is_none() || !self.seam_visible)
    }
}
