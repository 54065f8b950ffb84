pub mod junction;
pub mod path;

pub use junction::{JunctionGeometry, PlacedPath};
pub use path::{Path2, PathSegment};
