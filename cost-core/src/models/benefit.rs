use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A caller-defined monthly benefit (meal voucher, health plan, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: u32,
    pub name: String,
    pub value: Decimal,
}

impl Benefit {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}
