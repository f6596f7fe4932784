//! CSV loaders for charge rates and benefits.
//!
//! ## Charge rates
//!
//! | Column | Type    | Notes |
//! |--------|---------|-------|
//! | `name` | string  | Display name, must not be blank |
//! | `rate` | decimal | Fraction (`0.20`) or percent (`20`) per [`RateScale`] |
//!
//! ```csv
//! name,rate
//! INSS,20
//! RAT,2
//! ```
//!
//! ## Benefits
//!
//! | Column  | Type    | Notes |
//! |---------|---------|-------|
//! | `name`  | string  | Display name, must not be blank |
//! | `value` | decimal | Monthly value; `R$ 1.200,00` style is accepted |
//!
//! Numeric cells go through the same normalization as interactive input, so
//! a malformed or negative number loads as zero instead of failing the file.

use std::{io::Read, path::Path};

use cost_core::{
    Benefit, ChargeRate,
    input::{RateScale, parse_amount, parse_rate},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading reference data.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The CSV is structurally invalid (missing column, ragged row, ...).
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A row has an empty `name`. `row` is 1-based, excluding the header.
    #[error("blank name on row {row}")]
    EmptyName { row: usize },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ChargeRateRow {
    name: String,
    rate: String,
}

#[derive(Debug, Deserialize)]
struct BenefitRow {
    name: String,
    value: String,
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input)
}

fn required_name(
    name: String,
    row: usize,
) -> Result<String, LoaderError> {
    if name.trim().is_empty() {
        return Err(LoaderError::EmptyName { row });
    }
    Ok(name)
}

fn convert_charge_row(
    row: ChargeRateRow,
    row_number: usize,
    scale: RateScale,
) -> Result<ChargeRate, LoaderError> {
    let name = required_name(row.name, row_number)?;
    Ok(ChargeRate::new(name, parse_rate(&row.rate, scale)))
}

fn convert_benefit_row(
    row: BenefitRow,
    id: u32,
) -> Result<Benefit, LoaderError> {
    let name = required_name(row.name, id as usize)?;
    Ok(Benefit::new(id, name, parse_amount(&row.value)))
}

/// Loader for charge-rate tables.
pub struct ChargeRateLoader;

impl ChargeRateLoader {
    /// Parses charge rates in file order, converting rates from `scale` to
    /// fractions clamped to `[0, 1]`.
    pub fn parse<R: Read>(
        input: R,
        scale: RateScale,
    ) -> Result<Vec<ChargeRate>, LoaderError> {
        let charges = reader(input)
            .deserialize::<ChargeRateRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                convert_charge_row(row, idx + 1, scale)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = charges.len(), scale = %scale, "parsed charge rates");
        Ok(charges)
    }
}

/// Loader for benefit lists.
pub struct BenefitLoader;

impl BenefitLoader {
    /// Parses benefits in file order, assigning ids `1..`.
    pub fn parse<R: Read>(input: R) -> Result<Vec<Benefit>, LoaderError> {
        let benefits = reader(input)
            .deserialize::<BenefitRow>()
            .zip(1u32..)
            .map(|(result, id)| {
                let row = result?;
                convert_benefit_row(row, id)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = benefits.len(), "parsed benefits");
        Ok(benefits)
    }
}

fn open(path: &Path) -> Result<std::fs::File, LoaderError> {
    std::fs::File::open(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads a charge-rate CSV from disk.
pub fn load_charge_rates_from_file(
    path: &Path,
    scale: RateScale,
) -> Result<Vec<ChargeRate>, LoaderError> {
    ChargeRateLoader::parse(open(path)?, scale)
}

/// Reads a benefit CSV from disk.
pub fn load_benefits_from_file(path: &Path) -> Result<Vec<Benefit>, LoaderError> {
    BenefitLoader::parse(open(path)?)
}
