use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// How raw rate text is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateScale {
    /// `0.20` means 20%.
    #[default]
    Fraction,
    /// `20` means 20%.
    Percent,
}

impl RateScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fraction => "fraction",
            Self::Percent => "percent",
        }
    }

    /// Renders a fraction in this scale, e.g. `0.025` as `2.5` for percent.
    pub fn display_rate(
        &self,
        rate: Decimal,
    ) -> String {
        match self {
            Self::Fraction => rate.normalize().to_string(),
            Self::Percent => (rate * Decimal::ONE_HUNDRED).normalize().to_string(),
        }
    }
}

impl fmt::Display for RateScale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`RateScale`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rate scale '{0}' (expected 'fraction' or 'percent')")]
pub struct ParseRateScaleError(pub String);

impl FromStr for RateScale {
    type Err = ParseRateScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fraction" => Ok(Self::Fraction),
            "percent" => Ok(Self::Percent),
            _ => Err(ParseRateScaleError(s.to_string())),
        }
    }
}

/// Rewrites Brazilian or US separators into the plain `1234.56` form.
///
/// When both `.` and `,` appear, the one that occurs last is the decimal
/// separator. A single `,` on its own is a decimal comma; repeated separators
/// of the same kind are thousands groups.
fn canonical_number(s: &str) -> String {
    let dots = s.matches('.').count();
    let commas = s.matches(',').count();

    match (dots, commas) {
        (0, 0) => s.to_string(),
        (_, 0) if dots > 1 => s.replace('.', ""),
        (_, 0) => s.to_string(),
        (0, 1) => s.replace(',', "."),
        (0, _) => s.replace(',', ""),
        _ => {
            let last_dot = s.rfind('.');
            let last_comma = s.rfind(',');
            if last_comma > last_dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
    }
}

/// Parses a possibly signed number, tolerating a currency prefix and a
/// trailing percent sign. `None` for empty or malformed text.
fn parse_number(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix("R$")
        .or_else(|| trimmed.strip_prefix("r$"))
        .unwrap_or(trimmed)
        .trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    let canonical: String = canonical_number(trimmed)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    match canonical.parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(input = %s, "unparseable number treated as zero: {}", e);
            None
        }
    }
}

/// Largest accepted monetary amount: one quadrillion (10^15).
///
/// Keeps every product and sum in the breakdown far from the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Clamps a typed salary or amount to `[0, MAX_AMOUNT]`.
pub fn normalize_salary(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        warn!(value = %value, "negative amount clamped to zero");
        return Decimal::ZERO;
    }
    if value > MAX_AMOUNT {
        warn!(value = %value, max = %MAX_AMOUNT, "amount above maximum clamped");
        return MAX_AMOUNT;
    }
    value
}

/// Converts a rate in `scale` to a fraction clamped to `[0, 1]`.
pub fn normalize_rate(
    value: Decimal,
    scale: RateScale,
) -> Decimal {
    let fraction = match scale {
        RateScale::Fraction => value,
        RateScale::Percent => value / Decimal::ONE_HUNDRED,
    };
    if fraction < Decimal::ZERO || fraction > Decimal::ONE {
        warn!(
            value = %value,
            scale = %scale,
            "rate outside [0, 1] clamped"
        );
    }
    fraction.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Parses a monetary amount entered by a user.
///
/// Accepts `5000`, `5000.50`, `5.000,50`, `5,000.50` and an optional `R$`
/// prefix. Empty, malformed and negative input all become zero; amounts
/// above [`MAX_AMOUNT`] are clamped to it.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use cost_core::input::parse_amount;
///
/// assert_eq!(parse_amount("R$ 5.000,50"), dec!(5000.50));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// assert_eq!(parse_amount("-10"), Decimal::ZERO);
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    parse_number(s)
        .map(normalize_salary)
        .unwrap_or(Decimal::ZERO)
}

/// Parses a rate entered by a user into a fraction in `[0, 1]`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use cost_core::input::{RateScale, parse_rate};
///
/// assert_eq!(parse_rate("20", RateScale::Percent), dec!(0.2));
/// assert_eq!(parse_rate("2,5%", RateScale::Percent), dec!(0.025));
/// assert_eq!(parse_rate("0.08", RateScale::Fraction), dec!(0.08));
/// ```
pub fn parse_rate(
    s: &str,
    scale: RateScale,
) -> Decimal {
    parse_number(s)
        .map(|value| normalize_rate(value, scale))
        .unwrap_or(Decimal::ZERO)
}
