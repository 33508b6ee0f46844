use std::path::Path;

use anyhow::{Context, Result, bail};
use log::debug;

use super::model::Table;
use crate::error::PrepError;

/// How the first column and header of a file map onto a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Rows are samples, header names the outcome columns (task files).
    Plain,
    /// Rows are taxa, header names the samples (OTU tables). The result is
    /// transposed so it is keyed by sample.
    Transpose,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tab-separated MLRepo table whose first column is the row key.
pub fn load_table(path: &Path, mode: LoadMode) -> Result<Table, PrepError> {
    let table = read_tsv(path).map_err(|source| PrepError::TableParse {
        path: path.to_path_buf(),
        source,
    })?;

    if mode == LoadMode::Transpose && table.columns.is_empty() {
        return Err(PrepError::TableParse {
            path: path.to_path_buf(),
            source: anyhow::anyhow!("OTU table has no sample columns"),
        });
    }

    debug!("  Read {} with shape {}", path.display(), table.shape());

    Ok(match mode {
        LoadMode::Plain => table,
        LoadMode::Transpose => table.transpose(),
    })
}

// ---------------------------------------------------------------------------
// TSV reader
// ---------------------------------------------------------------------------

/// Layout: a header row `key_name<TAB>col1<TAB>col2...`, then one row per key.
/// Every row must have as many fields as the header.
fn read_tsv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .context("opening table")?;

    let headers = reader.headers().context("reading header row")?.clone();
    let mut header_fields = headers.iter().map(str::to_string);
    let Some(index_name) = header_fields.next() else {
        bail!("file is empty");
    };
    let columns: Vec<String> = header_fields.collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1, first data row is line 2.
        let record = result.with_context(|| format!("line {}", row_no + 2))?;
        let mut fields = record.iter().map(str::to_string);
        let key = fields.next().unwrap_or_default();
        rows.push((key, fields.collect::<Vec<_>>()));
    }

    Ok(Table::from_rows(index_name, columns, rows))
}
