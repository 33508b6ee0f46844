use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::NamedTempFile;

use super::align::Aligned;
use super::model::Table;
use crate::error::PrepError;

/// Output files written for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub x: PathBuf,
    pub y: PathBuf,
}

impl OutputPaths {
    /// `{out_dir}/{base_name}-x.csv` and `{out_dir}/{base_name}-y.csv`.
    pub fn new(out_dir: &Path, base_name: &str) -> Self {
        Self {
            x: out_dir.join(format!("{base_name}-x.csv")),
            y: out_dir.join(format!("{base_name}-y.csv")),
        }
    }
}

/// Serialise a table as CSV: key column first, then every value column.
pub fn to_csv_bytes(table: &Table) -> io::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_field(&table.index_name)?;
    writer.write_record(&table.columns)?;

    for (key, row) in table.index.iter().zip(&table.rows) {
        writer.write_field(key)?;
        writer.write_record(row)?;
    }

    writer.into_inner().map_err(|e| e.into_error())
}

/// Write both halves of an aligned dataset into `out_dir` (created if
/// missing), overwriting existing files.
///
/// Both files are first written to temporary files in `out_dir` and only
/// renamed into place once both are complete. If a rename fails, both target
/// paths are removed so a skipped dataset never leaves a half pair behind.
pub fn write_pair(
    aligned: &Aligned,
    out_dir: &Path,
    base_name: &str,
) -> Result<OutputPaths, PrepError> {
    let paths = OutputPaths::new(out_dir, base_name);
    fs::create_dir_all(out_dir).map_err(|source| PrepError::OutputWrite {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let x_bytes = to_csv_bytes(&aligned.features).map_err(|source| PrepError::OutputWrite {
        path: paths.x.clone(),
        source,
    })?;
    let y_bytes = to_csv_bytes(&aligned.labels).map_err(|source| PrepError::OutputWrite {
        path: paths.y.clone(),
        source,
    })?;

    // Dropping a staged file deletes it, so an early return here leaves the
    // targets untouched.
    let staged_x = stage(out_dir, &x_bytes).map_err(|source| PrepError::OutputWrite {
        path: paths.x.clone(),
        source,
    })?;
    let staged_y = stage(out_dir, &y_bytes).map_err(|source| PrepError::OutputWrite {
        path: paths.y.clone(),
        source,
    })?;

    for (staged, target) in [(staged_x, &paths.x), (staged_y, &paths.y)] {
        if let Err(err) = staged.persist(target) {
            discard(&paths);
            return Err(PrepError::OutputWrite {
                path: target.clone(),
                source: err.error,
            });
        }
    }

    debug!(
        "  Wrote {} bytes to {} and {} bytes to {}",
        x_bytes.len(),
        paths.x.display(),
        y_bytes.len(),
        paths.y.display()
    );

    Ok(paths)
}

fn stage(out_dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(out_dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Remove whatever is at either target path after a failed write.
fn discard(paths: &OutputPaths) {
    for path in [&paths.x, &paths.y] {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("  Could not remove {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::align::align;
    use tempfile::TempDir;

    fn sample_pair() -> Aligned {
        let features = Table::from_rows(
            "",
            vec!["t1".into(), "t;2".into()],
            vec![
                ("s1".to_string(), vec!["1".to_string(), "0".to_string()]),
                ("s2".to_string(), vec!["7".to_string(), "3".to_string()]),
            ],
        );
        let labels = Table::from_rows(
            "#SampleID",
            vec!["Var".into()],
            vec![
                ("s2".to_string(), vec!["groupB".to_string()]),
                ("s1".to_string(), vec!["group, A".to_string()]),
            ],
        );
        align("demo", &features, &labels).unwrap()
    }

    #[test]
    fn csv_has_key_column_first() {
        let bytes = to_csv_bytes(&sample_pair().labels).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "#SampleID,Var\ns1,\"group, A\"\ns2,groupB\n"
        );
    }

    #[test]
    fn unnamed_key_column_writes_empty_header() {
        let bytes = to_csv_bytes(&sample_pair().features).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), ",t1,t;2\ns1,1,0\ns2,7,3\n");
    }

    fn read_back(path: &Path) -> Table {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header = reader.headers().unwrap().clone();
        let rows = reader.records().map(|r| {
            let r = r.unwrap();
            let cells: Vec<String> = r.iter().skip(1).map(String::from).collect();
            (r[0].to_string(), cells)
        });
        Table::from_rows(
            &header[0],
            header.iter().skip(1).map(String::from).collect(),
            rows.collect::<Vec<_>>(),
        )
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn write_pair_round_trips() {
        let dir = TempDir::new().unwrap();
        let pair = sample_pair();
        let paths = write_pair(&pair, dir.path(), "demo").unwrap();
        assert_eq!(paths.x, dir.path().join("demo-x.csv"));
        assert_eq!(paths.y, dir.path().join("demo-y.csv"));

        assert_eq!(read_back(&paths.x), pair.features);
        assert_eq!(read_back(&paths.y), pair.labels);
        assert_eq!(entries(dir.path()), vec!["demo-x.csv", "demo-y.csv"]);
    }

    #[test]
    fn write_pair_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("in");
        let paths = write_pair(&sample_pair(), &out, "demo").unwrap();
        assert!(paths.x.is_file() && paths.y.is_file());
    }

    #[test]
    fn write_pair_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("demo-x.csv"), "stale contents that are longer\n").unwrap();

        let paths = write_pair(&sample_pair(), dir.path(), "demo").unwrap();
        assert_eq!(fs::read_to_string(paths.x).unwrap(), ",t1,t;2\ns1,1,0\ns2,7,3\n");
    }

    #[test]
    fn failed_y_write_removes_x() {
        let dir = TempDir::new().unwrap();
        // A directory where the y file should go makes the second rename fail.
        fs::create_dir(dir.path().join("demo-y.csv")).unwrap();

        let err = write_pair(&sample_pair(), dir.path(), "demo").unwrap_err();
        assert_eq!(err.kind(), "OutputWriteError");
        assert!(!dir.path().join("demo-x.csv").exists());
        assert_eq!(entries(dir.path()), vec!["demo-y.csv"]);
    }

    #[test]
    fn failed_x_write_leaves_no_half_pair() {
        let dir = TempDir::new().unwrap();
        // Output of an earlier run, then a blocked x target for this one.
        fs::write(dir.path().join("demo-y.csv"), "#SampleID,Var\nold,A\n").unwrap();
        fs::create_dir(dir.path().join("demo-x.csv")).unwrap();
        fs::write(dir.path().join("demo-x.csv").join("keep"), "").unwrap();

        let err = write_pair(&sample_pair(), dir.path(), "demo").unwrap_err();
        match &err {
            PrepError::OutputWrite { path, .. } => {
                assert_eq!(path, &dir.path().join("demo-x.csv"))
            }
            other => panic!("unexpected error: {other}"),
        }
        // No stale y next to a missing x, and no temporary files left over.
        assert!(!dir.path().join("demo-y.csv").exists());
        assert_eq!(entries(dir.path()), vec!["demo-x.csv"]);
    }
}
