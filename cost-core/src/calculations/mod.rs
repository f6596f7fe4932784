//! Cost calculations for a single position.
//!
//! The only entry point callers need is [`compute`] (or the equivalent
//! [`CostBreakdown::calculate`]); [`common`] holds the shared rounding rules.

pub mod breakdown;
pub mod common;

pub use breakdown::{CostBreakdown, compute};
