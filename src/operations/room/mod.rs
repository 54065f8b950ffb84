mod create;
mod loop_search;
mod membership;
mod shape;

pub use create::{CreateRoom, DEFAULT_ROOM_FILL};
pub use loop_search::{attempt_covering_loop, attempt_loop};
pub use membership::{DeleteRoom, ExtendRoom, RevalidateRoomsForPoint, ValidateRoom};
pub use shape::{room_anchor, room_area, room_shape, RecomputeRoom};
