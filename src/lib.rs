pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod operations;
pub mod plan;
pub mod units;

pub use config::PlanConfig;
pub use error::{FloorgraphError, Result};
pub use plan::{FloorPlan, Outcome};
