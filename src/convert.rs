use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::catalog::{self, DATASETS, DatasetDescriptor};
use crate::data::align::align;
use crate::data::loader::{LoadMode, load_table};
use crate::data::writer::write_pair;
use crate::error::PrepError;
use crate::report::{DatasetOutcome, Outcome, RunReport};
use crate::resolve::resolve;

pub const DEFAULT_INPUT_ROOT: &str = "MLRepo_temp/datasets";
pub const DEFAULT_OUTPUT_DIR: &str = "in";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything one batch run needs to know.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// MLRepo `datasets/` directory.
    pub input_root: PathBuf,
    /// Where the `-x.csv` / `-y.csv` pairs go. Created if missing.
    pub output_dir: PathBuf,
    /// Restrict the run to these datasets (full or base names). Empty = all.
    pub only: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            only: Vec::new(),
        }
    }
}

impl ConvertOptions {
    /// Descriptors selected by `only`, in catalog order.
    pub fn selected(&self) -> Result<Vec<&'static DatasetDescriptor>> {
        if self.only.is_empty() {
            return Ok(DATASETS.iter().collect());
        }

        if let Some(unknown) = self.only.iter().find(|q| catalog::find(q).is_none()) {
            let known: Vec<String> = DATASETS.iter().map(|d| d.base_name()).collect();
            bail!("unknown dataset '{unknown}'; known datasets: {}", known.join(", "));
        }

        Ok(DATASETS
            .iter()
            .filter(|d| self.only.iter().any(|q| d.matches(q)))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Convert every selected dataset, skipping (and logging) the ones that fail.
///
/// Only run-level problems, such as an output directory that cannot be
/// created, are returned as errors.
pub fn run(opts: &ConvertOptions) -> Result<RunReport> {
    let selected = opts.selected()?;

    fs::create_dir_all(&opts.output_dir).with_context(|| {
        format!("creating output directory {}", opts.output_dir.display())
    })?;

    info!("Converting MLRepo datasets to CSV format...");

    let mut report = RunReport {
        input_root: opts.input_root.clone(),
        output_dir: opts.output_dir.clone(),
        outcomes: Vec::with_capacity(selected.len()),
    };

    for desc in selected {
        info!("Processing {}...", desc.name);
        let outcome = match convert_dataset(desc, &opts.input_root, &opts.output_dir) {
            Ok(outcome) => DatasetOutcome {
                name: desc.name,
                outcome,
            },
            Err(err) => {
                warn!("  Skipping {} at {} stage ({}): {err}", desc.name, err.stage(), err.kind());
                DatasetOutcome::skipped(desc.name, &err)
            }
        };
        report.outcomes.push(outcome);
    }

    info!(
        "Data preparation complete: {} converted, {} skipped",
        report.converted(),
        report.skipped()
    );
    Ok(report)
}

/// Resolve, load, align and write a single dataset.
pub fn convert_dataset(
    desc: &DatasetDescriptor,
    input_root: &Path,
    output_dir: &Path,
) -> Result<Outcome, PrepError> {
    let paths = resolve(desc, input_root)?;

    let labels = load_table(&paths.labels, LoadMode::Plain)?;
    info!("  Labels shape: {}", labels.shape());

    let features = load_table(&paths.features, LoadMode::Transpose)?;
    info!("  Features shape (before filtering): {}", features.shape());

    let aligned = align(desc.name, &features, &labels)?;
    info!("  Common samples: {}", aligned.common_samples());

    let written = write_pair(&aligned, output_dir, &desc.base_name())?;
    info!("  Saved to {} and {}", written.x.display(), written.y.display());
    info!(
        "  Final shape: X={}, y={}",
        aligned.features.shape(),
        aligned.labels.shape()
    );

    Ok(Outcome::Converted {
        samples: aligned.common_samples(),
        features: aligned.features.columns.len(),
        label_columns: aligned.labels.columns.len(),
        x_path: written.x,
        y_path: written.y,
    })
}
