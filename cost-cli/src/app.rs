//! One calculator run: gather input, compute, render, export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use cost_core::{
    BreakdownInput, BreakdownResult, compute,
    input::{BenefitField, BreakdownForm, ChargeField, salary_from_query},
};
use cost_data::{export_to_dir, load_benefits_from_file, load_charge_rates_from_file};
use tracing::{debug, info};

use crate::{cli::Cli, config::AppConfig, report};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub input: BreakdownInput,
    pub result: BreakdownResult,
    pub report: String,
    pub export_path: Option<PathBuf>,
}

/// Fills a form from the configuration file and the command line, in that
/// order, on top of the built-in defaults.
///
/// The salary comes from `--salary`, then the `sal` query parameter, then
/// the configuration. Benefits accumulate: configured ones first, then the
/// benefits file, then each `--benefit`.
pub fn build_form(
    cli: &Cli,
    config: &AppConfig,
) -> Result<BreakdownForm> {
    let rate_scale = cli
        .rate_scale
        .or(config.rate_scale)
        .unwrap_or_default();
    let mut form = BreakdownForm::new(rate_scale);

    if let Some(path) = &cli.rates {
        let charges = load_charge_rates_from_file(path, rate_scale)
            .with_context(|| format!("failed to load charge rates from {}", path.display()))?;
        form.set_charges(&charges);
    } else if let Some(charges) = &config.charges {
        form.charges = charges
            .iter()
            .map(|charge| ChargeField {
                name: charge.name.clone(),
                rate: charge.rate.as_text(),
            })
            .collect();
    }

    let query_salary = cli.query.as_deref().and_then(salary_from_query);
    if let Some(salary) = &cli.salary {
        form.salary = salary.clone();
    } else if let Some(salary) = query_salary {
        form.salary = salary.to_string();
    } else if let Some(salary) = &config.salary {
        form.salary = salary.as_text();
    }

    form.benefits.extend(config.benefits.iter().map(|benefit| BenefitField {
        name: benefit.name.clone(),
        value: benefit.value.as_text(),
    }));
    if let Some(path) = &cli.benefits_file {
        let benefits = load_benefits_from_file(path)
            .with_context(|| format!("failed to load benefits from {}", path.display()))?;
        for benefit in benefits {
            form.add_benefit(benefit.name, benefit.value.to_string());
        }
    }
    for benefit in &cli.benefits {
        form.add_benefit(benefit.name.clone(), benefit.value.clone());
    }

    form.incidence_on_provisions = cli
        .incidence_override()
        .or(config.incidence_on_provisions)
        .unwrap_or(false);
    form.policy = cli.policy.or(config.policy).unwrap_or_default();

    debug!(
        salary = %form.salary,
        charges = form.charges.len(),
        benefits = form.benefits.len(),
        incidence = form.incidence_on_provisions,
        policy = %form.policy,
        rate_scale = %form.rate_scale,
        "form assembled"
    );
    Ok(form)
}

/// Runs the calculator once, exporting with `at` as the file timestamp.
pub fn run_at(
    cli: &Cli,
    at: NaiveDateTime,
) -> Result<RunOutcome> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let form = build_form(cli, &config)?;
    let input = form.snapshot();
    let result = compute(&input);
    info!(
        total = %result.total,
        percent_over_salary = %result.percent_over_salary,
        "cost breakdown computed"
    );

    let export_path = match &cli.export {
        Some(dir) => {
            let company = cli
                .company
                .as_deref()
                .or(config.company.as_deref())
                .unwrap_or_default();
            let path = export_to_dir(&result, dir, company, at)
                .with_context(|| format!("failed to export into {}", dir.display()))?;
            Some(path)
        }
        None => None,
    };

    let report = report::render(&input, &result);
    Ok(RunOutcome {
        input,
        result,
        report,
        export_path,
    })
}

/// Runs the calculator once, timestamping any export with the local time.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    run_at(cli, Local::now().naive_local())
}
