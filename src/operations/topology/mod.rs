mod copy;
mod delete;
mod join;
mod movement;
mod query;
mod resize;
mod split;

pub use copy::{CopyFragment, FragmentMap};
pub use delete::{DeleteEdge, DeletePoint};
pub use join::JoinStraightWalls;
pub use movement::{MergePoints, MovePoint};
pub use query::single_edge_between;
pub use resize::ResizeWall;
pub use split::{JoinFromWall, SplitEdge};
