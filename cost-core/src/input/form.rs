//! Raw, caller-owned form state.
//!
//! A front end keeps one [`BreakdownForm`], edits its text fields as the user
//! types and calls [`BreakdownForm::snapshot`] to obtain the immutable
//! [`BreakdownInput`] handed to the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::normalize::{RateScale, parse_amount, parse_rate};
use crate::models::{Benefit, BreakdownInput, ChargeRate, ProvisionPolicy};

const DEFAULT_SALARY: &str = "5000";

/// One editable charge: display name and the rate as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeField {
    pub name: String,
    pub rate: String,
}

/// One editable benefit: display name and the monthly value as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitField {
    pub name: String,
    pub value: String,
}

/// Text inputs of the calculator, exactly as the user entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownForm {
    pub salary: String,
    pub charges: Vec<ChargeField>,
    pub benefits: Vec<BenefitField>,
    pub incidence_on_provisions: bool,
    pub policy: ProvisionPolicy,
    /// Scale in which `charges[..].rate` is written.
    pub rate_scale: RateScale,
}

impl Default for BreakdownForm {
    fn default() -> Self {
        Self::new(RateScale::default())
    }
}

impl BreakdownForm {
    /// Form pre-filled with a 5000 salary and the statutory charges written
    /// in `rate_scale`.
    pub fn new(rate_scale: RateScale) -> Self {
        Self {
            salary: DEFAULT_SALARY.to_string(),
            charges: charge_fields(&ChargeRate::statutory_defaults(), rate_scale),
            benefits: Vec::new(),
            incidence_on_provisions: false,
            policy: ProvisionPolicy::default(),
            rate_scale,
        }
    }

    /// Replaces every charge field with the given typed charges.
    pub fn set_charges(
        &mut self,
        charges: &[ChargeRate],
    ) {
        self.charges = charge_fields(charges, self.rate_scale);
    }

    pub fn add_benefit(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.benefits.push(BenefitField {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Removes the benefit at `index`, returning it if it existed.
    pub fn remove_benefit(
        &mut self,
        index: usize,
    ) -> Option<BenefitField> {
        (index < self.benefits.len()).then(|| self.benefits.remove(index))
    }

    /// Normalizes every field into an engine input.
    ///
    /// Unparseable or negative numbers become zero, rates are converted to
    /// fractions clamped to `[0, 1]`, and benefits get ids `1..` in order.
    /// Unnamed benefits are labelled `Benefício <id>`.
    pub fn snapshot(&self) -> BreakdownInput {
        let charges = self
            .charges
            .iter()
            .map(|field| {
                ChargeRate::new(field.name.trim(), parse_rate(&field.rate, self.rate_scale))
            })
            .collect();

        let benefits = self
            .benefits
            .iter()
            .zip(1u32..)
            .map(|(field, id)| {
                let name = match field.name.trim() {
                    "" => format!("Benefício {id}"),
                    name => name.to_string(),
                };
                Benefit::new(id, name, parse_amount(&field.value))
            })
            .collect();

        BreakdownInput {
            salary: parse_amount(&self.salary),
            charges,
            benefits,
            incidence_on_provisions: self.incidence_on_provisions,
            policy: self.policy,
        }
    }

    /// Salary as the engine will see it.
    pub fn normalized_salary(&self) -> Decimal {
        parse_amount(&self.salary)
    }
}

fn charge_fields(
    charges: &[ChargeRate],
    scale: RateScale,
) -> Vec<ChargeField> {
    charges
        .iter()
        .map(|charge| ChargeField {
            name: charge.name.clone(),
            rate: scale.display_rate(charge.rate),
        })
        .collect()
}
