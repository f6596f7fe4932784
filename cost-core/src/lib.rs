pub mod calculations;
pub mod input;
pub mod models;

pub use calculations::{CostBreakdown, compute};
pub use models::*;
