mod benefit;
mod breakdown;
mod charge_rate;
mod provision_policy;

pub use benefit::Benefit;
pub use breakdown::{BreakdownInput, BreakdownItem, BreakdownResult, ItemKind};
pub use charge_rate::ChargeRate;
pub use provision_policy::{ParseProvisionPolicyError, ProvisionPolicy};
