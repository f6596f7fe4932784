pub mod export;
pub mod loader;

pub use export::{ExportError, export_file_name, export_to_dir, slugify, to_csv_string, write_csv};
pub use loader::{
    BenefitLoader, ChargeRateLoader, LoaderError, load_benefits_from_file,
    load_charge_rates_from_file,
};
