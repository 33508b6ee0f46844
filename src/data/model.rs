use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

// ---------------------------------------------------------------------------
// Shape – (rows, columns), printed the way DataFrame shapes usually are
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.columns)
    }
}

// ---------------------------------------------------------------------------
// Table – a string-valued frame keyed by its first column
// ---------------------------------------------------------------------------

/// A keyed table: one row per key, one cell per named column.
///
/// Cells are kept exactly as read so that writing a table back out never
/// reformats numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Header of the key column (e.g. `#SampleID`). May be empty.
    pub index_name: String,
    /// Value column names, in file order.
    pub columns: Vec<String>,
    /// Row keys, unique, in file order.
    pub index: Vec<String>,
    /// `rows[i]` holds the cells of `index[i]`; every row has `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(index_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            index_name: index_name.into(),
            columns,
            index: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a table from parsed rows, keeping the first row of any duplicated key.
    pub fn from_rows(
        index_name: impl Into<String>,
        columns: Vec<String>,
        rows: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Self {
        let mut table = Self::new(index_name, columns);
        let mut seen: HashSet<String> = HashSet::new();

        for (key, cells) in rows {
            debug_assert_eq!(cells.len(), table.columns.len());
            if !seen.insert(key.clone()) {
                warn!("  Duplicate row key '{key}' ignored; keeping first occurrence");
                continue;
            }
            table.index.push(key);
            table.rows.push(cells);
        }
        table
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.index.len(),
            columns: self.columns.len(),
        }
    }

    /// Cells of the row keyed by `key`.
    #[cfg(test)]
    pub fn row(&self, key: &str) -> Option<&[String]> {
        self.index
            .iter()
            .position(|k| k == key)
            .map(|i| self.rows[i].as_slice())
    }

    /// Swap rows and columns. Column names become the new keys and the old
    /// keys become column names; the new key column is unnamed.
    pub fn transpose(self) -> Table {
        let Table {
            columns,
            index,
            rows,
            ..
        } = self;

        let mut transposed: Vec<Vec<String>> = (0..columns.len())
            .map(|_| Vec::with_capacity(index.len()))
            .collect();
        for row in rows {
            for (j, cell) in row.into_iter().enumerate() {
                transposed[j].push(cell);
            }
        }

        Table::from_rows(String::new(), index, columns.into_iter().zip(transposed))
    }

    /// Restrict the table to `keys`, in that order. Keys not present are skipped.
    pub fn select(&self, keys: &[String]) -> Table {
        let positions: HashMap<&str, usize> = self
            .index
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();

        let mut out = Table::new(self.index_name.clone(), self.columns.clone());
        for key in keys {
            if let Some(&i) = positions.get(key.as_str()) {
                out.index.push(key.clone());
                out.rows.push(self.rows[i].clone());
            }
        }
        out
    }
}
