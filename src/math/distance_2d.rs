use super::{Point2, TOLERANCE};

/// Projects `p` onto the infinite line through `a`..`b` and returns the
/// parametric fraction of the foot point.
///
/// The result is not clamped and may fall outside `[0, 1]`. A zero-length
/// segment yields `0.0`.
#[must_use]
pub fn segment_fraction(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (p - a).dot(&d) / len_sq
}

/// Returns the point at fraction `t` along `a`..`b`.
#[must_use]
pub fn point_at_fraction(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Projects `p` onto the segment `a`..`b`, clamped to the segment.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    point_at_fraction(a, b, segment_fraction(p, a, b).clamp(0.0, 1.0))
}

/// Returns the squared distance from `p` to the segment `a`..`b`.
#[must_use]
pub fn point_to_segment_dist_sq(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - project_onto_segment(p, a, b)).norm_squared()
}

/// Returns `true` if `p` lies inside the bounding box of `a`..`b` grown by
/// `margin` on every side.
#[must_use]
pub fn near_segment_bounds(p: &Point2, a: &Point2, b: &Point2, margin: f64) -> bool {
    p.x >= a.x.min(b.x) - margin
        && p.x <= a.x.max(b.x) + margin
        && p.y >= a.y.min(b.y) - margin
        && p.y <= a.y.max(b.y) + margin
}

/// Clamps a fraction into `[low_buffer, 1 - high_buffer]`.
///
/// When the buffers overlap (the edge is too short for the fixture and its
/// junctions) the midpoint of the two limits is returned.
#[must_use]
pub fn clamp_fraction(f: f64, low_buffer: f64, high_buffer: f64) -> f64 {
    let low = low_buffer;
    let high = 1.0 - high_buffer;
    if low > high {
        return (low + high) * 0.5;
    }
    f.clamp(low, high)
}

/// Fraction buffers keeping something off the two ends of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionBuffer {
    /// Smallest allowed fraction.
    pub low: f64,
    /// Distance of the largest allowed fraction from `1.0`.
    pub high: f64,
}

impl FractionBuffer {
    /// Builds buffers for an edge of `edge_length` whose endpoints have
    /// thickness `from_size` and `to_size`, holding a fixture of
    /// `part_length` (zero for a bare point).
    #[must_use]
    pub fn new(edge_length: f64, from_size: f64, to_size: f64, part_length: f64) -> Self {
        if edge_length < TOLERANCE {
            return Self {
                low: 0.5,
                high: 0.5,
            };
        }
        let part = part_length / 2.0 / edge_length;
        Self {
            low: part + from_size / 2.0 / edge_length,
            high: part + to_size / 2.0 / edge_length,
        }
    }

    /// Largest allowed fraction.
    #[must_use]
    pub fn upper(&self) -> f64 {
        1.0 - self.high
    }

    /// Clamps `f` into this buffer range.
    #[must_use]
    pub fn clamp(&self, f: f64) -> f64 {
        clamp_fraction(f, self.low, self.high)
    }
}
