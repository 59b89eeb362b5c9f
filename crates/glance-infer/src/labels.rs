use crate::InferError;
use std::fs;
use std::path::Path;

/// Class-index to label-name vocabulary.
///
/// Line `i` of the source text names class `i`. Lines are trimmed and
/// blank lines are skipped, so a trailing newline does not produce a
/// phantom class.
#[derive(Clone, Debug)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn from_lines(text: &str) -> Self {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { labels }
    }

    /// Load a table from a label file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_lines(&text))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label for a class index.
    ///
    /// # Errors
    ///
    /// Returns `InferError::LabelIndex` when the index is outside the table.
    pub fn label_for(&self, index: usize) -> Result<&str, InferError> {
        self.get(index).ok_or(InferError::LabelIndex {
            index,
            table_len: self.labels.len(),
        })
    }
}
