//! Monthly cost breakdown of a position.
//!
//! Turns a [`BreakdownInput`] into the rows an employer pays every month on
//! top of (and including) the base salary.
//!
//! # Row Structure
//!
//! | Row                          | Value |
//! |------------------------------|-------|
//! | Salário Base                 | salary |
//! | one row per charge           | salary × rate |
//! | 13º Salário                  | per [`ProvisionPolicy`] |
//! | Férias + 1/3                 | per [`ProvisionPolicy`] |
//! | Benefícios                   | Σ benefit values |
//! | Incidência sobre Provisões   | Σ rates × (13th + vacation), only when enabled |
//! | Total                        | sum of every row above |
//!
//! # Provision Policies
//!
//! | Policy                | 13º Salário              | Férias + 1/3             |
//! |-----------------------|--------------------------|--------------------------|
//! | `ConstitutionalThird` | salary / 12              | salary × 4/3 / 12        |
//! | `ChargedBase`         | (salary + charges) / 12  | (salary + charges) / 12  |
//!
//! Every row is rounded to cents on its own and the total is summed from the
//! rounded rows, so the displayed rows always add up to the displayed total.
//!
//! Products and sums saturate at `Decimal::MAX` instead of overflowing, so
//! `compute` never panics even on input that skipped normalization.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use cost_core::{BreakdownInput, ItemKind, compute};
//!
//! let result = compute(&BreakdownInput::new(dec!(5000)));
//!
//! assert_eq!(result.charges_total(), dec!(1950.00));
//! assert_eq!(result.value_of(ItemKind::Thirteenth), Some(dec!(416.67)));
//! assert_eq!(result.value_of(ItemKind::VacationBonus), Some(dec!(555.56)));
//! assert_eq!(result.total, dec!(7922.23));
//! assert_eq!(result.percent_over_salary, dec!(58.44));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{percent_increase, round_cents, saturating_sum};
use crate::models::{
    BreakdownInput, BreakdownItem, BreakdownResult, ChargeRate, ItemKind, ProvisionPolicy,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
/// `salary × 4/3 / 12` reduces to `salary / 9`.
const VACATION_DIVISOR: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Computes the cost breakdown for `input`.
///
/// Shorthand for `CostBreakdown::new(input).calculate()`.
pub fn compute(input: &BreakdownInput) -> BreakdownResult {
    CostBreakdown::new(input).calculate()
}

/// The two monthly provisions, already rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Provisions {
    thirteenth: Decimal,
    vacation_bonus: Decimal,
}

impl Provisions {
    fn total(&self) -> Decimal {
        self.thirteenth.saturating_add(self.vacation_bonus)
    }
}

/// Calculator for the monthly cost of one position.
///
/// Borrows the input snapshot; it holds no state of its own, so calling
/// [`CostBreakdown::calculate`] repeatedly yields identical results.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use cost_core::{BreakdownInput, CostBreakdown, ItemKind, ProvisionPolicy};
///
/// let input = BreakdownInput::new(dec!(5000)).with_policy(ProvisionPolicy::ChargedBase);
/// let result = CostBreakdown::new(&input).calculate();
///
/// // (5000 + 1950) / 12 for each provision
/// assert_eq!(result.value_of(ItemKind::Thirteenth), Some(dec!(579.17)));
/// assert_eq!(result.value_of(ItemKind::VacationBonus), Some(dec!(579.17)));
/// assert_eq!(result.total, dec!(8108.34));
/// assert_eq!(result.percent_over_salary, dec!(62.17));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostBreakdown<'a> {
    input: &'a BreakdownInput,
}

impl<'a> CostBreakdown<'a> {
    pub fn new(input: &'a BreakdownInput) -> Self {
        Self { input }
    }

    /// Builds every row and the summary figures.
    ///
    /// Total over its domain: a zero salary produces zero rows and a zero
    /// percentage rather than an error.
    pub fn calculate(&self) -> BreakdownResult {
        let salary = round_cents(self.input.salary);
        let mut items = Vec::with_capacity(self.input.charges.len() + 6);

        items.push(labelled(ItemKind::BaseSalary, salary));

        let charges: Vec<Decimal> = self
            .input
            .charges
            .iter()
            .map(|charge| self.charge(salary, charge))
            .collect();
        let charges_total = saturating_sum(charges.iter().copied());
        items.extend(
            self.input
                .charges
                .iter()
                .zip(&charges)
                .enumerate()
                .map(|(index, (charge, value))| BreakdownItem {
                    kind: ItemKind::Charge { index },
                    name: charge.name.clone(),
                    value: *value,
                }),
        );

        let provisions = self.provisions(salary, charges_total);
        items.push(labelled(ItemKind::Thirteenth, provisions.thirteenth));
        items.push(labelled(ItemKind::VacationBonus, provisions.vacation_bonus));

        items.push(labelled(ItemKind::Benefits, self.benefits_total()));

        if self.input.incidence_on_provisions {
            let incidence = self.incidence_on_provisions(&provisions);
            items.push(labelled(ItemKind::IncidenceOnProvisions, incidence));
        }

        let total = saturating_sum(items.iter().map(|item| item.value));
        items.push(labelled(ItemKind::Total, total));

        let percent_over_salary = percent_increase(total, salary);

        debug!(
            salary = %salary,
            charges = %charges_total,
            provisions = %provisions.total(),
            total = %total,
            percent_over_salary = %percent_over_salary,
            policy = %self.input.policy,
            "computed cost breakdown"
        );

        BreakdownResult {
            salary,
            items,
            total,
            percent_over_salary,
        }
    }

    /// One charge applied to the base salary.
    fn charge(
        &self,
        salary: Decimal,
        charge: &ChargeRate,
    ) -> Decimal {
        if !charge.is_normalized() {
            warn!(
                charge = %charge.name,
                rate = %charge.rate,
                "charge rate outside [0, 1] reached the engine"
            );
        }
        round_cents(salary.saturating_mul(charge.rate))
    }

    /// 13th-salary and vacation provisions under the configured policy.
    fn provisions(
        &self,
        salary: Decimal,
        charges_total: Decimal,
    ) -> Provisions {
        match self.input.policy {
            ProvisionPolicy::ConstitutionalThird => Provisions {
                thirteenth: round_cents(salary / MONTHS_PER_YEAR),
                vacation_bonus: round_cents(salary / VACATION_DIVISOR),
            },
            ProvisionPolicy::ChargedBase => {
                let monthly = round_cents(salary.saturating_add(charges_total) / MONTHS_PER_YEAR);
                Provisions {
                    thirteenth: monthly,
                    vacation_bonus: monthly,
                }
            }
        }
    }

    fn benefits_total(&self) -> Decimal {
        round_cents(saturating_sum(self.input.benefits.iter().map(|b| b.value)))
    }

    /// Every charge applied a second time, to the rounded provisions.
    fn incidence_on_provisions(
        &self,
        provisions: &Provisions,
    ) -> Decimal {
        let base = provisions.total();
        round_cents(saturating_sum(
            self.input
                .charges
                .iter()
                .map(|charge| base.saturating_mul(charge.rate)),
        ))
    }
}

fn labelled(
    kind: ItemKind,
    value: Decimal,
) -> BreakdownItem {
    BreakdownItem {
        kind,
        name: kind.label().unwrap_or_default().to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::models::{Benefit, ChargeRate};

    fn default_input(salary: Decimal) -> BreakdownInput {
        BreakdownInput::new(salary)
    }

    /// Initializes tracing subscriber for tests that exercise log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn names(result: &BreakdownResult) -> Vec<&str> {
        result.items.iter().map(|i| i.name.as_str()).collect()
    }

    // =========================================================================
    // Row layout tests
    // =========================================================================

    #[test]
    fn rows_follow_engine_order() {
        let result = compute(&default_input(dec!(5000)));

        assert_eq!(
            names(&result),
            vec![
                "Salário Base",
                "INSS",
                "RAT",
                "Salário-Educação",
                "Sistema S",
                "FGTS",
                "Provisão Multa FGTS",
                "13º Salário",
                "Férias + 1/3",
                "Benefícios",
                "Total",
            ]
        );
    }

    #[test]
    fn incidence_row_sits_between_benefits_and_total() {
        let input = default_input(dec!(5000)).with_incidence_on_provisions(true);

        let result = compute(&input);
        let kinds: Vec<ItemKind> = result.items.iter().map(|i| i.kind).collect();

        assert_eq!(
            &kinds[kinds.len() - 3..],
            &[
                ItemKind::Benefits,
                ItemKind::IncidenceOnProvisions,
                ItemKind::Total
            ]
        );
    }

    #[test]
    fn charge_rows_are_keyed_by_position_not_name() {
        let input = default_input(dec!(1000)).with_charges(vec![
            ChargeRate::new("Taxa", dec!(0.10)),
            ChargeRate::new("Taxa", dec!(0.05)),
        ]);

        let result = compute(&input);

        assert_eq!(result.charge_value(0), Some(dec!(100.00)));
        assert_eq!(result.charge_value(1), Some(dec!(50.00)));
        assert_eq!(result.charges_total(), dec!(150.00));
    }

    // =========================================================================
    // ConstitutionalThird scenarios
    // =========================================================================

    #[test]
    fn default_rates_on_five_thousand() {
        let result = compute(&default_input(dec!(5000)));

        assert_eq!(result.charge_value(0), Some(dec!(1000.00)));
        assert_eq!(result.charge_value(1), Some(dec!(100.00)));
        assert_eq!(result.charge_value(2), Some(dec!(125.00)));
        assert_eq!(result.charge_value(3), Some(dec!(165.00)));
        assert_eq!(result.charge_value(4), Some(dec!(400.00)));
        assert_eq!(result.charge_value(5), Some(dec!(160.00)));
        assert_eq!(result.charges_total(), dec!(1950.00));
        assert_eq!(result.value_of(ItemKind::Thirteenth), Some(dec!(416.67)));
        assert_eq!(result.value_of(ItemKind::VacationBonus), Some(dec!(555.56)));
        assert_eq!(result.value_of(ItemKind::Benefits), Some(dec!(0.00)));
        assert_eq!(result.value_of(ItemKind::IncidenceOnProvisions), None);
        assert_eq!(result.total, dec!(7922.23));
        assert_eq!(result.percent_over_salary, dec!(58.44));
    }

    #[test]
    fn incidence_applies_every_rate_to_rounded_provisions() {
        let input = default_input(dec!(5000)).with_incidence_on_provisions(true);

        let result = compute(&input);

        // 0.39 × (416.67 + 555.56) = 379.1697
        assert_eq!(
            result.value_of(ItemKind::IncidenceOnProvisions),
            Some(dec!(379.17))
        );
        assert_eq!(result.total, dec!(8301.40));
    }

    #[test]
    fn salary_divisible_by_thirty_six_has_exact_provisions() {
        let result = compute(&default_input(dec!(3600)));

        assert_eq!(result.value_of(ItemKind::Thirteenth), Some(dec!(300.00)));
        assert_eq!(result.value_of(ItemKind::VacationBonus), Some(dec!(400.00)));
        assert_eq!(result.total, dec!(5704.00));
    }

    // =========================================================================
    // ChargedBase scenarios
    // =========================================================================

    #[test]
    fn charged_base_on_five_thousand() {
        let input = default_input(dec!(5000)).with_policy(ProvisionPolicy::ChargedBase);

        let result = compute(&input);

        assert_eq!(result.charges_total(), dec!(1950.00));
        assert_eq!(result.provisions_total(), dec!(1158.34));
        assert_eq!(result.total, dec!(8108.34));
        assert_eq!(result.percent_over_salary, dec!(62.17));
    }

    #[test]
    fn charged_base_with_incidence() {
        let input = default_input(dec!(1200))
            .with_policy(ProvisionPolicy::ChargedBase)
            .with_incidence_on_provisions(true);

        let result = compute(&input);

        // (1200 + 468) / 12 = 139 each; 0.39 × 278 = 108.42
        assert_eq!(result.value_of(ItemKind::Thirteenth), Some(dec!(139.00)));
        assert_eq!(
            result.value_of(ItemKind::IncidenceOnProvisions),
            Some(dec!(108.42))
        );
        assert_eq!(result.total, dec!(2054.42));
    }

    // =========================================================================
    // Degenerate input
    // =========================================================================

    #[test]
    fn zero_salary_yields_zero_everywhere() {
        let input = default_input(Decimal::ZERO).with_incidence_on_provisions(true);

        let result = compute(&input);

        assert!(result.items.iter().all(|item| item.value.is_zero()));
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.percent_over_salary, Decimal::ZERO);
    }

    #[test]
    fn zero_salary_with_benefits_keeps_percentage_at_zero() {
        let input = default_input(Decimal::ZERO).with_benefit(Benefit::new(1, "VR", dec!(600)));

        let result = compute(&input);

        assert_eq!(result.total, dec!(600.00));
        assert_eq!(result.percent_over_salary, Decimal::ZERO);
    }

    #[test]
    fn no_charges_leaves_only_salary_and_provisions() {
        let input = default_input(dec!(1200)).with_charges(Vec::new());

        let result = compute(&input);

        assert_eq!(result.charges_total(), Decimal::ZERO);
        assert_eq!(result.total, dec!(1433.33));
    }

    #[test]
    fn fractional_salary_is_rounded_to_cents_first() {
        let result = compute(&default_input(dec!(1000.004)));

        assert_eq!(result.value_of(ItemKind::BaseSalary), Some(dec!(1000.00)));
        assert_eq!(result.salary, dec!(1000.00));
    }

    #[test]
    fn largest_decimal_salary_saturates_instead_of_panicking() {
        let input = default_input(Decimal::MAX)
            .with_policy(ProvisionPolicy::ChargedBase)
            .with_incidence_on_provisions(true)
            .with_benefit(Benefit::new(1, "VR", Decimal::MAX));

        let result = compute(&input);

        assert_eq!(result.total, Decimal::MAX);
        assert!(result.items.iter().all(|item| item.value >= Decimal::ZERO));
    }

    #[test]
    fn huge_rate_on_huge_salary_saturates() {
        let input = default_input(dec!(1000000000000000))
            .with_charges(vec![ChargeRate::new("Pontos", Decimal::MAX)]);

        let result = compute(&input);

        assert_eq!(result.charge_value(0), Some(Decimal::MAX));
        assert_eq!(result.total, Decimal::MAX);
    }

    #[test]
    fn out_of_range_rate_is_still_computed() {
        let _guard = init_test_tracing();
        let input =
            default_input(dec!(100)).with_charges(vec![ChargeRate::new("Pontos", dec!(20))]);

        let result = compute(&input);

        assert_eq!(result.charge_value(0), Some(dec!(2000.00)));
    }

    // =========================================================================
    // Benefits and incidence toggling
    // =========================================================================

    #[test]
    fn benefits_are_summed_into_one_row() {
        let input = default_input(dec!(5000))
            .with_benefit(Benefit::new(1, "Vale-refeição", dec!(600)))
            .with_benefit(Benefit::new(2, "Plano de saúde", dec!(350.50)));

        let result = compute(&input);

        assert_eq!(result.value_of(ItemKind::Benefits), Some(dec!(950.50)));
        assert_eq!(result.total, dec!(8872.73));
    }

    #[test]
    fn adding_a_benefit_changes_only_benefits_and_total() {
        let base = default_input(dec!(4321.09));
        let with_benefit = base
            .clone()
            .with_benefit(Benefit::new(7, "Auxílio", dec!(123.45)));

        let before = compute(&base);
        let after = compute(&with_benefit);

        assert_eq!(after.total - before.total, dec!(123.45));
        for (b, a) in before.items.iter().zip(&after.items) {
            match a.kind {
                ItemKind::Benefits => assert_eq!(a.value - b.value, dec!(123.45)),
                ItemKind::Total => {}
                _ => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn toggling_incidence_off_subtracts_exactly_its_row() {
        let on = default_input(dec!(2750.55)).with_incidence_on_provisions(true);
        let off = on.clone().with_incidence_on_provisions(false);

        let with_incidence = compute(&on);
        let without = compute(&off);
        let incidence = with_incidence
            .value_of(ItemKind::IncidenceOnProvisions)
            .unwrap();

        assert_eq!(with_incidence.total - without.total, incidence);
        assert_eq!(without.value_of(ItemKind::IncidenceOnProvisions), None);
        assert_eq!(compute(&on), with_incidence);
    }

    #[test]
    fn compute_is_idempotent() {
        let input = default_input(dec!(9876.54))
            .with_incidence_on_provisions(true)
            .with_benefit(Benefit::new(1, "VT", dec!(220)));

        assert_eq!(compute(&input), compute(&input));
    }
}
