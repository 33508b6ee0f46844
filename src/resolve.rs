use std::path::{Path, PathBuf};

use crate::catalog::DatasetDescriptor;
use crate::error::{FileRole, PrepError};

/// The two input files of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub labels: PathBuf,
    pub features: PathBuf,
}

/// Build the input paths for `desc` under `root` without touching the disk.
///
/// ```text
/// labels   = root/folder/task_name
/// features = root/folder[/taxonomy]/otutable.txt[suffix]
/// ```
pub fn input_paths(desc: &DatasetDescriptor, root: &Path) -> InputPaths {
    let folder = root.join(desc.folder);
    let labels = folder.join(desc.task_name);
    let features = match desc.taxonomy {
        Some(taxonomy) => folder.join(taxonomy),
        None => folder,
    }
    .join(desc.otu_filename());

    InputPaths { labels, features }
}

/// Like [`input_paths`] but also requires both files to exist.
/// The task file is checked first.
pub fn resolve(desc: &DatasetDescriptor, root: &Path) -> Result<InputPaths, PrepError> {
    let paths = input_paths(desc, root);

    for (role, path) in [
        (FileRole::Labels, &paths.labels),
        (FileRole::Features, &paths.features),
    ] {
        if !path.is_file() {
            return Err(PrepError::MissingInputFile {
                dataset: desc.name.to_string(),
                role,
                path: path.clone(),
            });
        }
    }

    Ok(paths)
}
