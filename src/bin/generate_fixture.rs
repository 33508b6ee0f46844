use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mlrepo_prep::fixture::{FixtureSpec, write_mlrepo_tree};

/// Write a synthetic MLRepo tree covering every known dataset.
#[derive(Parser)]
#[command(name = "generate-fixture")]
#[command(about = "Generate synthetic MLRepo task files and OTU tables", long_about = None)]
struct Cli {
    /// Root of the generated datasets directory
    #[arg(long, default_value = "MLRepo_temp/datasets")]
    root: PathBuf,

    /// Samples shared by task files and OTU tables
    #[arg(long, default_value_t = 40)]
    samples: usize,

    /// Samples only present in task files
    #[arg(long, default_value_t = 3)]
    label_only: usize,

    /// Samples only present in OTU tables
    #[arg(long, default_value_t = 5)]
    feature_only: usize,

    /// Taxa per OTU table
    #[arg(long, default_value_t = 60)]
    taxa: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let spec = FixtureSpec {
        shared_samples: cli.samples,
        label_only: cli.label_only,
        feature_only: cli.feature_only,
        taxa: cli.taxa,
        seed: cli.seed,
    };
    let files = write_mlrepo_tree(&cli.root, &spec)?;

    println!(
        "Wrote {} files ({} shared samples, {} taxa) under {}",
        files.len(),
        spec.shared_samples,
        spec.taxa,
        cli.root.display()
    );
    Ok(())
}
