//! The fixed list of MLRepo datasets this tool knows how to convert.
//!
//! Adding a dataset means appending a [`DatasetDescriptor`] to [`DATASETS`];
//! nothing else in the crate needs to change.

/// Green Genes taxonomy folder used by most MLRepo datasets.
const GREENGENES: Option<&str> = Some("gg");

/// One MLRepo dataset: where its files live and what to call the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetDescriptor {
    /// Canonical identifier, also the source of the output base name.
    pub name: &'static str,
    /// Folder under the MLRepo `datasets/` root.
    pub folder: &'static str,
    /// Taxonomy sub-folder holding the OTU table, if any.
    pub taxonomy: Option<&'static str>,
    /// Suffix appended to `otutable.txt`, if any.
    pub otu_suffix: Option<&'static str>,
    /// Task (label) file name inside `folder`.
    pub task_name: &'static str,
}

impl DatasetDescriptor {
    const fn gg(name: &'static str, folder: &'static str, task_name: &'static str) -> Self {
        Self {
            name,
            folder,
            taxonomy: GREENGENES,
            otu_suffix: None,
            task_name,
        }
    }

    /// Output file stem: the name with every `.txt` removed.
    pub fn base_name(&self) -> String {
        self.name.replace(".txt", "")
    }

    /// OTU table file name, `otutable.txt` plus the optional suffix.
    pub fn otu_filename(&self) -> String {
        format!("otutable.txt{}", self.otu_suffix.unwrap_or_default())
    }

    /// Whether `query` names this dataset, either by full name or base name.
    pub fn matches(&self, query: &str) -> bool {
        self.name == query || self.base_name() == query
    }
}

pub static DATASETS: [DatasetDescriptor; 12] = [
    DatasetDescriptor::gg("gevers-task-ileum.txt", "gevers", "task-ileum.txt"),
    DatasetDescriptor::gg("gevers-task-rectum.txt", "gevers", "task-rectum.txt"),
    DatasetDescriptor {
        name: "hmp-task-gastro-oral.txt-reduced",
        folder: "hmp",
        taxonomy: GREENGENES,
        otu_suffix: Some("-reduced"),
        task_name: "task-gastro-oral.txt",
    },
    DatasetDescriptor::gg("hmp-task-sex.txt", "hmp", "task-sex.txt"),
    DatasetDescriptor::gg(
        "hmp-task-stool-tongue-paired.txt",
        "hmp",
        "task-stool-tongue-paired.txt",
    ),
    DatasetDescriptor::gg(
        "hmp-task-sub-supragingivalplaque-paired.txt",
        "hmp",
        "task-sub-supragingivalplaque-paired.txt",
    ),
    DatasetDescriptor::gg("kostic-task.txt", "kostic", "task.txt"),
    // Shotgun datasets: the OTU table sits directly in the dataset folder.
    DatasetDescriptor {
        name: "qin2012-task-healthy-diabetes.txt",
        folder: "qin2012",
        taxonomy: None,
        otu_suffix: None,
        task_name: "task-healthy-diabetes.txt",
    },
    DatasetDescriptor {
        name: "qin2014-task-healthy-cirrhosis.txt",
        folder: "qin2014",
        taxonomy: None,
        otu_suffix: None,
        task_name: "task-healthy-cirrhosis.txt",
    },
    DatasetDescriptor::gg("ravel-task-black-hispanic.txt", "ravel", "task-black-hispanic.txt"),
    DatasetDescriptor::gg("ravel-task-nugent-category.txt", "ravel", "task-nugent-category.txt"),
    DatasetDescriptor::gg("ravel-task-white-black.txt", "ravel", "task-white-black.txt"),
];

/// Look up a descriptor by full name or base name.
pub fn find(query: &str) -> Option<&'static DatasetDescriptor> {
    DATASETS.iter().find(|d| d.matches(query))
}
