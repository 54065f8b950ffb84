pub mod angle_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type in document coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rejects locations with NaN or infinite coordinates.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` naming the offending coordinates.
pub fn ensure_finite(p: Point2) -> crate::error::Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(crate::error::GeometryError::NonFinite { x: p.x, y: p.y }.into())
    }
}
