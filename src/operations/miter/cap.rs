use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::PlanConfig;
use crate::geometry::{JunctionGeometry, Path2, PlacedPath};
use crate::graph::EdgeId;
use crate::math::angle_2d::{ccw_sweep, is_coincident, is_opposite, unit};
use crate::math::intersect_2d::{extend_point, offset_corner};
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Vector2};

/// A wall leaving a junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallArm {
    pub edge: EdgeId,
    /// Direction the wall leaves the junction in.
    pub angle: f64,
    pub half_width: f64,
    /// Centreline length of the wall.
    pub length: f64,
}

/// Output of [`compute_junction`].
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionResult {
    pub geometry: JunctionGeometry,
    /// Corner points in document coordinates.
    pub corners: Vec<Point2>,
}

impl JunctionResult {
    fn hidden() -> Self {
        Self {
            geometry: JunctionGeometry::hidden(),
            corners: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stroke {
    Line,
    Move,
}

/// Computes the mitered shape of a junction at `location` joined by `arms`.
///
/// Arms are ordered by angle (ties by edge key). Each circularly consecutive
/// pair contributes one corner where their facing wall faces meet, followed
/// by a short stub running along the second wall. Walls pointing the same way
/// contribute nothing; if no pair yields a corner the junction is hidden.
#[must_use]
pub fn compute_junction(
    location: Point2,
    arms: &[WallArm],
    has_divider: bool,
    config: &PlanConfig,
) -> JunctionResult {
    match arms {
        [] => JunctionResult::hidden(),
        [arm] => end_cap(location, arm),
        _ => miter(location, arms, has_divider, config),
    }
}

/// A lone wall ends in a flat cap across its width.
fn end_cap(location: Point2, arm: &WallArm) -> JunctionResult {
    let normal = left_normal(unit(arm.angle)) * arm.half_width;
    let left = Point2::from(normal);
    let right = Point2::from(-normal);

    let mut seam = Path2::new(left, false);
    seam.line_to(right);

    JunctionResult {
        geometry: JunctionGeometry {
            fill: None,
            outline: None,
            seam: Some(PlacedPath::normalized(seam)),
            straight: false,
            seam_visible: true,
        },
        corners: vec![location + normal, location - normal],
    }
}

fn miter(
    location: Point2,
    arms: &[WallArm],
    has_divider: bool,
    config: &PlanConfig,
) -> JunctionResult {
    let mut sorted = arms.to_vec();
    sorted.sort_by(|a, b| a.angle.total_cmp(&b.angle).then(a.edge.cmp(&b.edge)));
    let n = sorted.len();
    let tol = config.angle_tolerance;

    let mut corners: Vec<Vector2> = Vec::with_capacity(n);
    let mut vertices: Vec<(Vector2, Stroke)> = Vec::with_capacity(n * 4);
    let mut straight = false;

    for i in 0..n {
        let a = sorted[i];
        let b = sorted[(i + 1) % n];
        let sweep = ccw_sweep(a.angle, b.angle);
        if is_coincident(sweep, tol) {
            continue;
        }

        let corner = if is_opposite(sweep, tol) {
            if n == 2 {
                straight = true;
            }
            unit(a.angle + FRAC_PI_2) * a.half_width.max(b.half_width)
        } else {
            match offset_corner(a.angle, a.half_width, a.angle + sweep, b.half_width) {
                Some(c) => c,
                None => continue,
            }
        };
        corners.push(corner);

        // Stub along wall `b`: out along its right face, across its end,
        // back along its left face toward the next corner.
        let db = unit(b.angle);
        let nb = left_normal(db);
        let reach = (3.0 * b.half_width)
            .min(b.length)
            .min(config.max_stub_length);
        let mut out = reach;
        if sweep > PI && !is_opposite(sweep, tol) {
            // Exterior corners sit behind the junction; run the stub out
            // from there so the silhouette stays outside the walls.
            let behind = -corner.dot(&db);
            if behind > 0.0 {
                out += behind.min(b.length);
            }
        }
        let far_right = corner + db * out;
        let far_left = far_right + nb * (b.half_width - corner.dot(&nb));
        let near_left = far_left - db * reach;

        vertices.push((corner, Stroke::Line));
        vertices.push((far_right, Stroke::Line));
        vertices.push((far_left, Stroke::Move));
        vertices.push((near_left, Stroke::Line));
    }

    if corners.is_empty() {
        tracing::trace!(arms = n, "walls overlap radially; junction hidden");
        return JunctionResult::hidden();
    }

    let points: Vec<Point2> = vertices.iter().map(|(v, _)| Point2::from(*v)).collect();
    let Some(mut fill) = Path2::from_points(&points, true) else {
        return JunctionResult::hidden();
    };
    let mut outline = Path2::new(points[0], true);
    for (v, stroke) in &vertices[1..] {
        match stroke {
            Stroke::Line => outline.line_to(Point2::from(*v)),
            Stroke::Move => outline.move_to(Point2::from(*v)),
        }
    }
    let origin = fill.normalize();
    outline.translate(&origin);

    let mut seam = Path2::new(Point2::origin(), false);
    for c in &corners {
        seam.line_to(Point2::from(extend_point(c, config.stroke_width)));
        seam.line_to(Point2::origin());
    }

    JunctionResult {
        geometry: JunctionGeometry {
            fill: Some(PlacedPath { path: fill, origin }),
            outline: Some(PlacedPath {
                path: outline,
                origin,
            }),
            seam: Some(PlacedPath::normalized(seam)),
            straight,
            seam_visible: !(straight && has_divider),
        },
        corners: corners.iter().map(|c| location + c).collect(),
    }
}
