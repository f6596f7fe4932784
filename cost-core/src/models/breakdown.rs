use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Benefit, ChargeRate, ProvisionPolicy};

/// Immutable snapshot of everything the cost breakdown depends on.
///
/// Callers own and rebuild this value whenever an input changes; the engine
/// only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownInput {
    /// Gross monthly base salary, already normalized to be non-negative.
    pub salary: Decimal,

    /// Active employer charges, each applied independently to the salary.
    pub charges: Vec<ChargeRate>,

    /// Additional monthly benefits, summed into a single row.
    pub benefits: Vec<Benefit>,

    /// Also apply every charge to the 13th-salary and vacation provisions.
    pub incidence_on_provisions: bool,

    pub policy: ProvisionPolicy,
}

impl BreakdownInput {
    /// Input with the statutory charges, no benefits, incidence off and the
    /// default provision policy.
    pub fn new(salary: Decimal) -> Self {
        Self {
            salary,
            charges: ChargeRate::statutory_defaults(),
            benefits: Vec::new(),
            incidence_on_provisions: false,
            policy: ProvisionPolicy::default(),
        }
    }

    pub fn with_charges(
        self,
        charges: Vec<ChargeRate>,
    ) -> Self {
        Self { charges, ..self }
    }

    pub fn with_benefits(
        self,
        benefits: Vec<Benefit>,
    ) -> Self {
        Self { benefits, ..self }
    }

    pub fn with_benefit(
        mut self,
        benefit: Benefit,
    ) -> Self {
        self.benefits.push(benefit);
        self
    }

    pub fn with_incidence_on_provisions(
        self,
        incidence_on_provisions: bool,
    ) -> Self {
        Self {
            incidence_on_provisions,
            ..self
        }
    }

    pub fn with_policy(
        self,
        policy: ProvisionPolicy,
    ) -> Self {
        Self { policy, ..self }
    }

    /// Sum of all charge rates as a fraction.
    pub fn total_rate(&self) -> Decimal {
        self.charges.iter().map(|c| c.rate).sum()
    }
}

/// Identifies what a [`BreakdownItem`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    BaseSalary,
    /// Charge at `index` in [`BreakdownInput::charges`].
    Charge { index: usize },
    Thirteenth,
    VacationBonus,
    Benefits,
    IncidenceOnProvisions,
    Total,
}

impl ItemKind {
    /// Display label for every kind except charges, which carry their own name.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::BaseSalary => Some("Salário Base"),
            Self::Charge { .. } => None,
            Self::Thirteenth => Some("13º Salário"),
            Self::VacationBonus => Some("Férias + 1/3"),
            Self::Benefits => Some("Benefícios"),
            Self::IncidenceOnProvisions => Some("Incidência sobre Provisões"),
            Self::Total => Some("Total"),
        }
    }
}

/// One row of the cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub kind: ItemKind,
    pub name: String,
    /// Rounded to two decimal places.
    pub value: Decimal,
}

/// Ordered cost breakdown plus its summary figures.
///
/// `items` starts with the [`ItemKind::BaseSalary`] row and ends with the
/// [`ItemKind::Total`] row, whose value equals [`BreakdownResult::total`] and
/// the exact sum of every preceding row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownResult {
    /// Base salary the breakdown was computed for, rounded to cents.
    pub salary: Decimal,
    pub items: Vec<BreakdownItem>,
    pub total: Decimal,
    /// `(total - salary) / salary × 100`, rounded to two places; zero for a
    /// zero salary.
    pub percent_over_salary: Decimal,
}

impl BreakdownResult {
    /// Value of the first row of the given kind, if present.
    pub fn value_of(
        &self,
        kind: ItemKind,
    ) -> Option<Decimal> {
        self.items
            .iter()
            .find(|item| item.kind == kind)
            .map(|item| item.value)
    }

    pub fn charge_value(
        &self,
        index: usize,
    ) -> Option<Decimal> {
        self.value_of(ItemKind::Charge { index })
    }

    pub fn charges_total(&self) -> Decimal {
        self.items
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Charge { .. }))
            .map(|item| item.value)
            .sum()
    }

    /// 13th salary plus vacation provision.
    pub fn provisions_total(&self) -> Decimal {
        self.items
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Thirteenth | ItemKind::VacationBonus))
            .map(|item| item.value)
            .sum()
    }

    /// Every row except the total.
    pub fn line_items(&self) -> impl Iterator<Item = &BreakdownItem> {
        self.items
            .iter()
            .filter(|item| item.kind != ItemKind::Total)
    }
}
