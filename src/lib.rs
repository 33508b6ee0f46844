//! Convert MLRepo microbiome datasets into sample-aligned CSV pairs.
//!
//! For each dataset in [`catalog::DATASETS`] the task file (labels) and the
//! OTU table (features) are located, parsed, restricted to the samples they
//! share, and written as `{base}-x.csv` / `{base}-y.csv`.

pub mod catalog;
pub mod convert;
pub mod data;
pub mod error;
pub mod fixture;
pub mod report;
pub mod resolve;

pub use convert::{ConvertOptions, run};
pub use error::PrepError;
pub use report::RunReport;
