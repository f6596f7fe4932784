pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

pub use app::{RunOutcome, build_form, run};
pub use cli::Cli;
