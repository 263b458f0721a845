//! Data model shared by the extraction, checkpoint and scoring crates

use serde::{Deserialize, Serialize};

/// A formal name together with the abbreviation the text defines for it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbbrPair {
    pub formal: String,
    pub abbr: String,
}

impl AbbrPair {
    pub fn new(formal: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            formal: formal.into(),
            abbr: abbr.into(),
        }
    }
}

/// One excerpt of the input dataset with its annotated pairs
///
/// Items are read once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetItem {
    /// Zero-based position in the dataset file
    pub index: usize,
    pub file: String,
    pub text: String,
    pub ground_truth: Vec<AbbrPair>,
}

impl DatasetItem {
    /// Canonical id of this item, `{file}_{index}`
    pub fn id(&self) -> String {
        record_id(&self.file, self.index)
    }
}

/// Build the canonical id used to key result records
pub fn record_id(file: &str, index: usize) -> String {
    format!("{file}_{index}")
}

/// The persisted outcome of one successful extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Canonical id, serialized as `idx` for compatibility with existing output files
    #[serde(rename = "idx")]
    pub id: String,
    pub file: String,
    pub text: String,
    pub extracted_pairs: Vec<AbbrPair>,
}

impl ResultRecord {
    pub fn new(item: &DatasetItem, extracted_pairs: Vec<AbbrPair>) -> Self {
        Self {
            id: item.id(),
            file: item.file.clone(),
            text: item.text.clone(),
            extracted_pairs,
        }
    }
}
