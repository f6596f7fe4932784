use std::path::PathBuf;

use clap::Parser;
use cost_core::{ProvisionPolicy, input::RateScale};

/// A `NAME=VALUE` benefit given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitArg {
    pub name: String,
    pub value: String,
}

fn parse_benefit_arg(s: &str) -> Result<BenefitArg, String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    Ok(BenefitArg {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

/// Monthly cost of a position: base salary plus employer charges, 13th-salary
/// and vacation provisions, and benefits.
///
/// Flags override the configuration file, which overrides the built-in
/// defaults (5000 salary, statutory charges).
#[derive(Debug, Parser)]
#[command(name = "custo-cargo", version, about)]
pub struct Cli {
    /// Base salary, e.g. `5000`, `5.000,00` or `R$ 5.000,00`.
    #[arg(short, long)]
    pub salary: Option<String>,

    /// URL or query string whose `sal` parameter seeds the salary when
    /// `--salary` is not given.
    #[arg(long)]
    pub query: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file with `name,rate` columns replacing the charges.
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// Scale of rates in the rates file and configuration: `fraction` or `percent`.
    #[arg(long)]
    pub rate_scale: Option<RateScale>,

    /// Extra benefit as `NAME=VALUE`; may be repeated.
    #[arg(short, long = "benefit", value_parser = parse_benefit_arg)]
    pub benefits: Vec<BenefitArg>,

    /// CSV file with `name,value` columns of benefits.
    #[arg(long)]
    pub benefits_file: Option<PathBuf>,

    /// Apply the charges to the 13th-salary and vacation provisions too.
    #[arg(short, long, overrides_with = "no_incidence")]
    pub incidence: bool,

    /// Do not apply the charges to the provisions, even if the config does.
    #[arg(long, overrides_with = "incidence")]
    pub no_incidence: bool,

    /// Provision formula: `constitutional-third` or `charged-base`.
    #[arg(short, long)]
    pub policy: Option<ProvisionPolicy>,

    /// Directory to write the `Item,Valor` CSV export into.
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Company or project name embedded in the export file name.
    #[arg(long)]
    pub company: Option<String>,

    /// Log level or filter directive (defaults to `RUST_LOG`, then `info`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Incidence setting forced by the command line, if any. The last of
    /// `--incidence` / `--no-incidence` wins.
    pub fn incidence_override(&self) -> Option<bool> {
        match (self.incidence, self.no_incidence) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
