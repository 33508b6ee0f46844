use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use mlrepo_prep::catalog::DATASETS;
use mlrepo_prep::convert::{ConvertOptions, DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_DIR, run};
use mlrepo_prep::resolve::input_paths;

/// Convert MLRepo datasets into `{name}-x.csv` / `{name}-y.csv` pairs.
#[derive(Parser)]
#[command(name = "mlrepo-prep", version)]
#[command(about = "Convert MLRepo OTU tables and task files to aligned CSV pairs", long_about = None)]
struct Cli {
    /// MLRepo datasets directory
    #[arg(long, default_value = DEFAULT_INPUT_ROOT)]
    input_root: PathBuf,

    /// Output directory for the CSV pairs
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Only convert these datasets (full or base name, repeatable)
    #[arg(long = "dataset", value_name = "NAME")]
    datasets: Vec<String>,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the known datasets and their input paths, then exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<ExitCode> {
    if cli.list {
        for desc in &DATASETS {
            let paths = input_paths(desc, &cli.input_root);
            println!(
                "{}\n  labels:   {}\n  features: {}",
                desc.base_name(),
                paths.labels.display(),
                paths.features.display()
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let opts = ConvertOptions {
        input_root: cli.input_root,
        output_dir: cli.output_dir,
        only: cli.datasets,
    };
    let report = run(&opts)?;

    if let Some(path) = &cli.report {
        let json = report.to_json().context("serialising run report")?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    }

    print!("{report}");
    let out_dir = fs::canonicalize(&opts.output_dir).unwrap_or(opts.output_dir);
    println!("Datasets saved to: {}", out_dir.display());

    if report.all_skipped() {
        error!("No dataset was converted");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
