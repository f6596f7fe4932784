//! End-to-end runs: command line and config file in, report and export out.

use std::{fs, path::Path};

use chrono::NaiveDate;
use clap::Parser;
use cost_cli::{Cli, app::run_at};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("custo-cargo").chain(args.iter().copied()))
        .expect("valid arguments")
}

fn write_file(
    dir: &Path,
    name: &str,
    contents: &str,
) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.display().to_string()
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../cost-data/tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

const CONFIG: &str = r#"
company = "Ostentação Prime"
salary = "R$ 5.000,00"
incidence_on_provisions = true

[[benefits]]
name = "Vale-refeição"
value = 600
"#;

// ============================================================================
// Tests
// ============================================================================

#[test]
fn config_file_drives_the_breakdown_and_export() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "custo.toml", CONFIG);
    let out = dir.path().display().to_string();
    let at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap();

    let outcome = run_at(&parse(&["--config", &config, "--export", &out]), at).unwrap();

    // 5000 + 1950 + 416.67 + 555.56 + 600 + 379.17
    assert_eq!(outcome.result.total, dec!(8901.40));

    let path = outcome.export_path.expect("export requested");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("custo-cargo-ostentacao-prime-20250601-093000.csv")
    );
    let csv = fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("Item,Valor\nSalário Base,5000.00\n"));
    assert!(csv.contains("\nBenefícios,600.00\n"));
    assert!(csv.contains("\nIncidência sobre Provisões,379.17\n"));
    assert!(csv.ends_with("Total,8901.40\n"));
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "custo.toml", CONFIG);
    let at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let outcome = run_at(
        &parse(&[
            "--config",
            &config,
            "--salary",
            "3000",
            "--policy",
            "charged-base",
            "--company",
            "Filial Norte",
            "--export",
            &dir.path().display().to_string(),
        ]),
        at,
    )
    .unwrap();

    assert_eq!(outcome.input.salary, dec!(3000));
    assert!(outcome.input.incidence_on_provisions);
    assert_eq!(outcome.input.benefits.len(), 1);
    assert!(
        outcome
            .export_path
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .is_some_and(|n| n.starts_with("custo-cargo-filial-norte-"))
    );
}

#[test]
fn no_incidence_flag_turns_off_configured_incidence() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "custo.toml", CONFIG);
    let at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let outcome = run_at(&parse(&["--config", &config, "--no-incidence"]), at).unwrap();

    assert!(!outcome.input.incidence_on_provisions);
    // 8901.40 - 379.17
    assert_eq!(outcome.result.total, dec!(8522.23));
    assert!(!outcome.report.contains("Incidência"));
}

#[test]
fn huge_salary_is_capped_instead_of_crashing() {
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let outcome = run_at(
        &parse(&["--salary", "60000000000000000000000000000", "--incidence"]),
        at,
    )
    .unwrap();

    assert_eq!(outcome.input.salary, dec!(1000000000000000));
    assert!(outcome.report.contains("R$ 1.000.000.000.000.000,00"));
}

#[test]
fn rates_and_benefits_files_are_loaded() {
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let outcome = run_at(
        &parse(&[
            "--salary",
            "5000",
            "--rates",
            &fixture("encargos_percentual.csv"),
            "--rate-scale",
            "percent",
            "--benefits-file",
            &fixture("beneficios.csv"),
            "--incidence",
        ]),
        at,
    )
    .unwrap();

    assert_eq!(outcome.input.total_rate(), dec!(0.39));
    assert_eq!(outcome.result.total, dec!(9471.90));
    assert!(outcome.export_path.is_none());
}

#[test]
fn report_lists_benefits_and_increase() {
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let outcome = run_at(&parse(&["--query", "?sal=5000", "-b", "VT=220"]), at).unwrap();

    assert!(outcome.report.contains("Benefícios"));
    assert!(outcome.report.contains("R$ 220,00"));
    assert!(outcome.report.lines().any(|l| l.ends_with("R$ 8.142,23")));
    assert!(outcome.report.contains("Acréscimo sobre o salário: 62,84%"));
}

#[test]
fn missing_config_file_fails_the_run() {
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let result = run_at(&parse(&["--config", "/no/such/custo.toml"]), at);

    assert!(result.is_err());
}

#[test]
fn export_into_missing_directory_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nao-existe").display().to_string();
    let at = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();

    let result = run_at(&parse(&["--export", &missing]), at);

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("failed to export"));
}
