//! Loading of the annotated input dataset

use crate::error::{Error, Result};
use crate::models::{AbbrPair, DatasetItem};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One element of the input JSON array; `null` reads as empty
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    list: Option<Vec<RawPair>>,
}

#[derive(Debug, Deserialize)]
struct RawPair {
    #[serde(default)]
    formal: Option<String>,
    #[serde(default)]
    abbr: Option<String>,
}

/// Load the dataset file, assigning each item its position as index
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetItem>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::dataset(path, format!("Failed to read file: {e}")))?;
    let items = parse_dataset(&content).map_err(|e| Error::dataset(path, e.to_string()))?;
    debug!("Loaded {} dataset items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse dataset JSON; missing or null fields default to empty values
pub fn parse_dataset(content: &str) -> serde_json::Result<Vec<DatasetItem>> {
    let raw: Vec<RawItem> = serde_json::from_str(content)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| DatasetItem {
            index,
            file: item.file.unwrap_or_default(),
            text: item.text.unwrap_or_default(),
            ground_truth: item
                .list
                .unwrap_or_default()
                .into_iter()
                .map(|p| {
                    AbbrPair::new(p.formal.unwrap_or_default(), p.abbr.unwrap_or_default())
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_dataset_assigns_positions() {
        let json = r#"[
            {"text": "a", "file": "f1", "list": [{"formal": "X", "abbr": "Y"}]},
            {"text": "b", "file": "f2", "list": []}
        ]"#;
        let items = parse_dataset(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].index, 0);
        assert_eq!(items[1].index, 1);
        assert_eq!(items[0].ground_truth, vec![AbbrPair::new("X", "Y")]);
        assert_eq!(items[1].id(), "f2_1");
    }

    #[test]
    fn test_parse_dataset_defaults_missing_fields() {
        let json = r#"[{"list": [{"formal": "X"}]}, {}]"#;
        let items = parse_dataset(json).unwrap();
        assert_eq!(items[0].text, "");
        assert_eq!(items[0].file, "");
        assert_eq!(items[0].ground_truth, vec![AbbrPair::new("X", "")]);
        assert!(items[1].ground_truth.is_empty());
    }

    #[test]
    fn test_parse_dataset_null_fields_read_as_empty() {
        let json = r#"[{"text": "a", "file": "f", "list": [{"formal": "X", "abbr": null}, {"formal": null, "abbr": "Y"}]},
            {"text": null, "file": "g", "list": null}]"#;
        let items = parse_dataset(json).unwrap();
        assert_eq!(
            items[0].ground_truth,
            vec![AbbrPair::new("X", ""), AbbrPair::new("", "Y")]
        );
        assert_eq!(items[1].text, "");
        assert!(items[1].ground_truth.is_empty());
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/lawabbr/data.json")).unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn test_load_dataset_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"text": "a"}"#).unwrap();
        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("Dataset error"));
    }
}
