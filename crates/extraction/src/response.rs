//! Validation of raw completion text into abbreviation pairs

use crate::error::{truncate_for_log, Result};
use lawabbr_core::AbbrPair;
use serde_json::Value;
use tracing::debug;

/// Remove Markdown code-fence markers wherever they appear, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a completion into pairs.
///
/// Text that is not JSON at all is an error. JSON of the wrong shape (not an
/// array, or an element that is not an object with both a `formal` and an
/// `abbr` key) yields an empty list: the model answered, it just found
/// nothing usable. Values that are not strings are kept as their JSON text.
pub fn parse_pairs(raw: &str) -> Result<Vec<AbbrPair>> {
    let content = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&content)?;

    match validate_pairs(&value) {
        Some(pairs) => Ok(pairs),
        None => {
            debug!(
                "Response does not match the pair schema, treating as empty: {}",
                truncate_for_log(&content)
            );
            Ok(Vec::new())
        }
    }
}

fn validate_pairs(value: &Value) -> Option<Vec<AbbrPair>> {
    value.as_array()?.iter().map(validate_pair).collect()
}

fn validate_pair(element: &Value) -> Option<AbbrPair> {
    let object = element.as_object()?;
    let formal = value_text(object.get("formal")?);
    let abbr = value_text(object.get("abbr")?);
    Some(AbbrPair::new(formal, abbr))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
