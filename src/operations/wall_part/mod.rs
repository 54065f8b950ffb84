mod anchor;
mod attach;
mod parent;

pub use anchor::{part_buffer, ReanchorWallPart};
pub use attach::{AttachWallPart, DeleteWallPart, FlipDoor};
pub use parent::{Anchor, FindWallPartParent, SlideWallPart};
