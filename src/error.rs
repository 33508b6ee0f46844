use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// FileRole – which of the two per-dataset inputs a path refers to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    /// The task file holding sample labels.
    Labels,
    /// The OTU table holding taxon abundances.
    Features,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Labels => write!(f, "task file"),
            FileRole::Features => write!(f, "OTU table"),
        }
    }
}

// ---------------------------------------------------------------------------
// PrepError – everything that can make a single dataset be skipped
// ---------------------------------------------------------------------------

/// Dataset-scoped failures. None of these abort a run; the driver logs them
/// and moves on to the next descriptor.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("{role} not found: {}", path.display())]
    MissingInputFile {
        dataset: String,
        role: FileRole,
        path: PathBuf,
    },

    #[error("failed to parse {}", path.display())]
    TableParse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("no common samples between labels and features")]
    NoCommonSamples { dataset: String },

    #[error("failed to write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrepError {
    /// Stable kind name, used in logs and in the run report.
    pub fn kind(&self) -> &'static str {
        match self {
            PrepError::MissingInputFile { .. } => "MissingInputFile",
            PrepError::TableParse { .. } => "TableParseError",
            PrepError::NoCommonSamples { .. } => "NoCommonSamples",
            PrepError::OutputWrite { .. } => "OutputWriteError",
        }
    }

    /// Pipeline stage that raised the error.
    pub fn stage(&self) -> &'static str {
        match self {
            PrepError::MissingInputFile { .. } => "resolve",
            PrepError::TableParse { .. } => "load",
            PrepError::NoCommonSamples { .. } => "align",
            PrepError::OutputWrite { .. } => "write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_stages_line_up() {
        let missing = PrepError::MissingInputFile {
            dataset: "kostic-task.txt".into(),
            role: FileRole::Features,
            path: PathBuf::from("kostic/gg/otutable.txt"),
        };
        assert_eq!(missing.kind(), "MissingInputFile");
        assert_eq!(missing.stage(), "resolve");
        assert_eq!(
            missing.to_string(),
            "OTU table not found: kostic/gg/otutable.txt"
        );

        let overlap = PrepError::NoCommonSamples {
            dataset: "ravel-task-white-black.txt".into(),
        };
        assert_eq!(overlap.kind(), "NoCommonSamples");
        assert_eq!(overlap.stage(), "align");
        assert_eq!(
            overlap.to_string(),
            "no common samples between labels and features"
        );
    }

    #[test]
    fn parse_error_keeps_its_cause() {
        let err = PrepError::TableParse {
            path: PathBuf::from("task.txt"),
            source: anyhow::anyhow!("row 3 has 4 fields, header has 2"),
        };
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.contains("failed to parse task.txt"));
        assert!(chain.contains("row 3 has 4 fields"));
    }
}
