//! CSV export of a computed breakdown.
//!
//! ## Format
//!
//! ```csv
//! Item,Valor
//! Salário Base,5000.00
//! INSS,1000.00
//! ...
//! Total,7922.23
//! ```
//!
//! One row per [`BreakdownItem`](cost_core::BreakdownItem) in engine order,
//! values as plain numbers with exactly two decimal places so the file stays
//! machine-parseable. Nothing is recomputed here.

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use chrono::NaiveDateTime;
use cost_core::BreakdownResult;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

const HEADER: [&str; 2] = ["Item", "Valor"];
const FILE_PREFIX: &str = "custo-cargo";
const FALLBACK_SLUG: &str = "empresa";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Errors that can occur while exporting a breakdown.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders a value with exactly two decimal places, e.g. `5000` as `5000.00`.
fn two_places(value: Decimal) -> String {
    let mut value = value;
    value.rescale(2);
    value.to_string()
}

/// Writes the `Item,Valor` table for `result` to `writer`.
pub fn write_csv<W: Write>(
    result: &BreakdownResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for item in &result.items {
        csv_writer.write_record([item.name.as_str(), two_places(item.value).as_str()])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Returns the `Item,Valor` table for `result` as a string.
///
/// ```
/// use rust_decimal_macros::dec;
/// use cost_core::{BreakdownInput, compute};
/// use cost_data::to_csv_string;
///
/// let csv = to_csv_string(&compute(&BreakdownInput::new(dec!(5000)))).unwrap();
///
/// assert!(csv.starts_with("Item,Valor\nSalário Base,5000.00\nINSS,1000.00\n"));
/// assert!(csv.ends_with("Total,7922.23\n"));
/// ```
pub fn to_csv_string(result: &BreakdownResult) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Folds Portuguese diacritics to their ASCII base letter.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn separator_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static pattern is valid"))
}

/// Normalizes a company or project name for use in a file name.
///
/// ```
/// use cost_data::slugify;
///
/// assert_eq!(slugify("Ostentação Prime – Teresina/PI"), "ostentacao-prime-teresina-pi");
/// assert_eq!(slugify("  "), "");
/// ```
pub fn slugify(name: &str) -> String {
    let folded: String = name.to_lowercase().chars().map(fold_accent).collect();
    separator_runs()
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

/// File name for an export taken at `at`:
/// `custo-cargo-<slug>-<YYYYMMDD-HHMMSS>.csv`.
///
/// ```
/// use chrono::NaiveDate;
/// use cost_data::export_file_name;
///
/// let at = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap().and_hms_opt(14, 5, 9).unwrap();
///
/// assert_eq!(export_file_name("Acme Ltda.", at), "custo-cargo-acme-ltda-20250307-140509.csv");
/// assert_eq!(export_file_name("", at), "custo-cargo-empresa-20250307-140509.csv");
/// ```
pub fn export_file_name(
    company: &str,
    at: NaiveDateTime,
) -> String {
    let slug = match slugify(company) {
        slug if slug.is_empty() => FALLBACK_SLUG.to_string(),
        slug => slug,
    };
    format!("{FILE_PREFIX}-{slug}-{}.csv", at.format(TIMESTAMP_FORMAT))
}

/// Writes the export into `dir` under [`export_file_name`] and returns the
/// full path. An existing file with the same name is overwritten.
pub fn export_to_dir(
    result: &BreakdownResult,
    dir: &Path,
    company: &str,
    at: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(company, at));
    let io_error = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = std::fs::File::create(&path).map_err(io_error)?;
    write_csv(result, std::io::BufWriter::new(file))?;

    info!(path = %path.display(), rows = result.items.len(), "exported cost breakdown");
    Ok(path)
}
