pub mod selection;

pub use selection::{Selection, SelectionCommand, SelectionEntry};

use std::collections::HashMap;

/// Separator placed between annotated files in the output
pub const FILE_SEPARATOR: &str = "\n\n";

/// Precomputed, immutable view of one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path exactly as given on the command line
    pub path: String,
    /// Header comment line followed by the file's text
    pub annotated_content: String,
    pub token_count: usize,
    pub word_count: usize,
    /// True when the file could not be read and only the header is present
    pub unreadable: bool,
}

/// File records keyed by path, iterated in input order
#[derive(Debug, Clone, Default)]
pub struct FileRecords {
    records: Vec<FileRecord>,
    index: HashMap<String, usize>,
}

impl FileRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. Returns false and keeps the existing one if the path is already present.
    pub fn insert(&mut self, record: FileRecord) -> bool {
        if self.index.contains_key(&record.path) {
            return false;
        }
        self.index.insert(record.path.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.index.get(path).map(|&i| &self.records[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    /// Paths in input order
    pub fn paths(&self) -> Vec<String> {
        self.records.iter().map(|r| r.path.clone()).collect()
    }
}

/// Token and word totals for a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub files: usize,
    pub tokens: usize,
    pub words: usize,
}

/// Concatenated output for a selection together with its totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub text: String,
    pub token_count: usize,
    pub word_count: usize,
    pub file_count: usize,
}

/// Sums counts over the selected paths without building the text.
///
/// Paths without a record are skipped.
pub fn totals<S: AsRef<str>>(selected: &[S], records: &FileRecords) -> Totals {
    selected
        .iter()
        .filter_map(|p| records.get(p.as_ref()))
        .fold(Totals::default(), |acc, r| Totals {
            files: acc.files + 1,
            tokens: acc.tokens + r.token_count,
            words: acc.words + r.word_count,
        })
}

/// Joins the annotated contents of the selected paths, in the given order
pub fn aggregate<S: AsRef<str>>(selected: &[S], records: &FileRecords) -> AggregateResult {
    let picked: Vec<&FileRecord> = selected
        .iter()
        .filter_map(|p| records.get(p.as_ref()))
        .collect();

    let text = picked
        .iter()
        .map(|r| r.annotated_content.as_str())
        .collect::<Vec<_>>()
        .join(FILE_SEPARATOR);

    AggregateResult {
        text,
        token_count: picked.iter().map(|r| r.token_count).sum(),
        word_count: picked.iter().map(|r| r.word_count).sum(),
        file_count: picked.len(),
    }
}
