use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::PrepError;

// ---------------------------------------------------------------------------
// Outcome of a single dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Converted {
        samples: usize,
        features: usize,
        label_columns: usize,
        x_path: PathBuf,
        y_path: PathBuf,
    },
    Skipped {
        stage: &'static str,
        kind: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOutcome {
    pub name: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl DatasetOutcome {
    pub fn skipped(name: &'static str, err: &PrepError) -> Self {
        Self {
            name,
            outcome: Outcome::Skipped {
                stage: err.stage(),
                kind: err.kind(),
                message: ErrorChain(err).to_string(),
            },
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.outcome, Outcome::Converted { .. })
    }
}

/// Displays an error followed by its causes, `a: b: c`.
struct ErrorChain<'a>(&'a (dyn std::error::Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Whole-run report
// ---------------------------------------------------------------------------

/// Summary of one batch run, in descriptor order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub input_root: PathBuf,
    pub output_dir: PathBuf,
    pub outcomes: Vec<DatasetOutcome>,
}

impl RunReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.converted()
    }

    /// True when datasets were attempted and none of them converted.
    pub fn all_skipped(&self) -> bool {
        !self.outcomes.is_empty() && self.converted() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} of {} datasets converted, {} skipped",
            self.converted(),
            self.outcomes.len(),
            self.skipped()
        )?;
        for o in &self.outcomes {
            if let Outcome::Skipped { stage, kind, message } = &o.outcome {
                writeln!(f, "  skipped {} [{stage}/{kind}]: {message}", o.name)?;
            }
        }
        Ok(())
    }
}
