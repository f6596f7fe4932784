//! Boundary between raw user text and the engine's typed domain.
//!
//! Nothing here ever fails: empty, malformed or out-of-range entries become
//! zero (or are clamped) and a warning is logged. The engine therefore only
//! ever sees salaries in `[0, MAX_AMOUNT]` and rates in `[0, 1]`.

mod form;
mod normalize;
mod query;

pub use form::{BenefitField, BreakdownForm, ChargeField};
pub use normalize::{
    MAX_AMOUNT, ParseRateScaleError, RateScale, normalize_rate, normalize_salary, parse_amount,
    parse_rate,
};
pub use query::salary_from_query;
