mod cap;
mod junction;

pub use cap::{compute_junction, JunctionResult, WallArm};
pub use junction::{MiterJunction, UpdatePointSize};
