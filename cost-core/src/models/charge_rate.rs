use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named employer charge levied as a fraction of the base salary.
///
/// `rate` is always a fraction in `[0, 1]` (`0.20` for 20%). Conversion from
/// percentage points happens in [`crate::input`], never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRate {
    pub name: String,
    pub rate: Decimal,
}

impl ChargeRate {
    pub fn new(
        name: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// The six reference employer charges, in display order.
    ///
    /// | Charge              | Rate  |
    /// |---------------------|-------|
    /// | INSS                | 20%   |
    /// | RAT                 | 2%    |
    /// | Salário-Educação    | 2.5%  |
    /// | Sistema S           | 3.3%  |
    /// | FGTS                | 8%    |
    /// | Provisão Multa FGTS | 3.2%  |
    pub fn statutory_defaults() -> Vec<ChargeRate> {
        vec![
            ChargeRate::new("INSS", Decimal::new(20, 2)),
            ChargeRate::new("RAT", Decimal::new(2, 2)),
            ChargeRate::new("Salário-Educação", Decimal::new(25, 3)),
            ChargeRate::new("Sistema S", Decimal::new(33, 3)),
            ChargeRate::new("FGTS", Decimal::new(8, 2)),
            ChargeRate::new("Provisão Multa FGTS", Decimal::new(32, 3)),
        ]
    }

    /// Whether the rate lies inside `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        self.rate >= Decimal::ZERO && self.rate <= Decimal::ONE
    }
}
