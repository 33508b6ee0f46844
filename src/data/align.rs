use std::collections::HashSet;

use super::model::Table;
use crate::error::PrepError;

/// Feature and label tables restricted to the same samples in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligned {
    pub features: Table,
    pub labels: Table,
}

impl Aligned {
    /// Number of samples present in both tables.
    pub fn common_samples(&self) -> usize {
        self.features.index.len()
    }
}

/// Sample keys present in both tables, in the feature table's order.
pub fn common_samples(features: &Table, labels: &Table) -> Vec<String> {
    let label_keys: HashSet<&str> = labels.index.iter().map(String::as_str).collect();
    features
        .index
        .iter()
        .filter(|k| label_keys.contains(k.as_str()))
        .cloned()
        .collect()
}

/// Keep only the samples found in both tables. Row `i` of the returned
/// feature table and row `i` of the returned label table share a key.
pub fn align(dataset: &str, features: &Table, labels: &Table) -> Result<Aligned, PrepError> {
    let common = common_samples(features, labels);
    if common.is_empty() {
        return Err(PrepError::NoCommonSamples {
            dataset: dataset.to_string(),
        });
    }

    Ok(Aligned {
        features: features.select(&common),
        labels: labels.select(&common),
    })
}
