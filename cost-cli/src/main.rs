use clap::Parser;
use tracing::info;

use cost_cli::{Cli, app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let outcome = app::run(&cli)?;
    print!("{}", outcome.report);

    if let Some(path) = &outcome.export_path {
        info!("export written to {}", path.display());
    }

    Ok(())
}
