mod affected;
pub mod miter;
mod refresh;
pub mod room;
pub mod topology;
pub mod wall_part;

pub use affected::{Affected, Edit, EntityKey};
pub use refresh::Refresh;
