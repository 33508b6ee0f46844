//! Synthetic MLRepo trees for demos and tests.
//!
//! Every catalog dataset gets a task file and an OTU table at the paths the
//! resolver expects. Datasets that share an OTU table (same folder, taxonomy
//! and suffix) share one file, as they do in MLRepo.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use crate::catalog::{DATASETS, DatasetDescriptor};
use crate::resolve::input_paths;

/// Shape of the generated data.
#[derive(Debug, Clone)]
pub struct FixtureSpec {
    /// Samples present in both the task file and the OTU table.
    pub shared_samples: usize,
    /// Extra samples that only appear in the task file.
    pub label_only: usize,
    /// Extra samples that only appear in the OTU table.
    pub feature_only: usize,
    /// Taxa (rows) per OTU table.
    pub taxa: usize,
    pub seed: u64,
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self {
            shared_samples: 40,
            label_only: 3,
            feature_only: 5,
            taxa: 60,
            seed: 42,
        }
    }
}

/// Write a fixture tree under `root`; returns every file written, in order.
pub fn write_mlrepo_tree(root: &Path, spec: &FixtureSpec) -> Result<Vec<PathBuf>> {
    let mut rng = SimpleRng::new(spec.seed);
    let mut written = Vec::new();
    let mut otu_tables: BTreeSet<PathBuf> = BTreeSet::new();

    for desc in &DATASETS {
        let paths = input_paths(desc, root);

        write_task_file(&paths.labels, desc, spec, &mut rng)
            .with_context(|| format!("writing {}", paths.labels.display()))?;
        debug!("  wrote {}", paths.labels.display());
        written.push(paths.labels);

        if otu_tables.insert(paths.features.clone()) {
            write_otu_table(&paths.features, desc, spec, &mut rng)
                .with_context(|| format!("writing {}", paths.features.display()))?;
            debug!("  wrote {}", paths.features.display());
            written.push(paths.features);
        }
    }

    Ok(written)
}

fn sample_id(desc: &DatasetDescriptor, i: usize) -> String {
    format!("{}.S{i:03}", desc.folder)
}

fn label_only_id(desc: &DatasetDescriptor, i: usize) -> String {
    format!("{}.L{i:03}", desc.folder)
}

/// Two class names taken from the task name, e.g. `task-healthy-diabetes.txt`
/// gives `healthy` / `diabetes`.
fn class_names(desc: &DatasetDescriptor) -> (String, String) {
    let stem = desc
        .task_name
        .trim_end_matches(".txt")
        .trim_start_matches("task");
    let parts: Vec<&str> = stem.split('-').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [a, b, ..] => (a.to_string(), b.to_string()),
        _ => ("Case".to_string(), "Control".to_string()),
    }
}

fn tsv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?)
}

/// Samples are listed newest first so alignment has to reorder them.
fn write_task_file(
    path: &Path,
    desc: &DatasetDescriptor,
    spec: &FixtureSpec,
    rng: &mut SimpleRng,
) -> Result<()> {
    let (first, second) = class_names(desc);
    let mut writer = tsv_writer(path)?;
    writer.write_record(["#SampleID", "Var"])?;

    let ids = (0..spec.label_only)
        .map(|i| label_only_id(desc, i))
        .chain((0..spec.shared_samples).rev().map(|i| sample_id(desc, i)));
    for id in ids {
        let class = if rng.next_f64() < 0.5 { &first } else { &second };
        writer.write_record([id.as_str(), class.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_otu_table(
    path: &Path,
    desc: &DatasetDescriptor,
    spec: &FixtureSpec,
    rng: &mut SimpleRng,
) -> Result<()> {
    let samples: Vec<String> = (0..spec.shared_samples + spec.feature_only)
        .map(|i| sample_id(desc, i))
        .collect();

    let mut writer = tsv_writer(path)?;
    writer.write_field("#OTU ID")?;
    writer.write_record(&samples)?;

    for t in 0..spec.taxa {
        writer.write_field(format!("{}", 100_000 + t * 37))?;
        let counts: Vec<String> = samples
            .iter()
            .map(|_| {
                // OTU tables are sparse: most cells are zero.
                if rng.next_f64() < 0.6 {
                    "0".to_string()
                } else {
                    (1 + rng.next_u64() % 500).to_string()
                }
            })
            .collect();
        writer.write_record(&counts)?;
    }

    writer.flush()?;
    Ok(())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{LoadMode, load_table};
    use tempfile::TempDir;

    #[test]
    fn every_descriptor_resolves() {
        let dir = TempDir::new().unwrap();
        write_mlrepo_tree(dir.path(), &FixtureSpec::default()).unwrap();
        for desc in &DATASETS {
            assert!(crate::resolve::resolve(desc, dir.path()).is_ok(), "{}", desc.name);
        }
    }

    #[test]
    fn shared_otu_tables_are_written_once() {
        let dir = TempDir::new().unwrap();
        let files = write_mlrepo_tree(dir.path(), &FixtureSpec::default()).unwrap();
        let unique: BTreeSet<&PathBuf> = files.iter().collect();
        assert_eq!(unique.len(), files.len());
        // 12 task files + gevers, hmp (plain and reduced), kostic, qin2012, qin2014, ravel
        assert_eq!(files.len(), 12 + 7);
    }

    #[test]
    fn tables_have_requested_shape() {
        let dir = TempDir::new().unwrap();
        let spec = FixtureSpec {
            shared_samples: 6,
            label_only: 2,
            feature_only: 1,
            taxa: 4,
            seed: 7,
        };
        write_mlrepo_tree(dir.path(), &spec).unwrap();
        let paths = input_paths(&DATASETS[0], dir.path());

        let labels = load_table(&paths.labels, LoadMode::Plain).unwrap();
        assert_eq!((labels.shape().rows, labels.shape().columns), (8, 1));
        let features = load_table(&paths.features, LoadMode::Transpose).unwrap();
        assert_eq!((features.shape().rows, features.shape().columns), (7, 4));
    }

    #[test]
    fn same_seed_same_bytes() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let spec = FixtureSpec::default();
        let files_a = write_mlrepo_tree(a.path(), &spec).unwrap();
        write_mlrepo_tree(b.path(), &spec).unwrap();

        for path in files_a {
            let rel = path.strip_prefix(a.path()).unwrap();
            assert_eq!(fs::read(&path).unwrap(), fs::read(b.path().join(rel)).unwrap());
        }
    }

    #[test]
    fn class_names_come_from_task() {
        assert_eq!(
            class_names(&DATASETS[7]),
            ("healthy".to_string(), "diabetes".to_string())
        );
        assert_eq!(
            class_names(&DATASETS[6]),
            ("Case".to_string(), "Control".to_string())
        );
    }
}
