//! Error types for extraction operations

use thiserror::Error;

/// Why an extraction could not be completed.
///
/// Every variant means "no answer was obtained": the item is left unrecorded
/// so a later run retries it. A well-formed answer containing no pairs is
/// not an error.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Completion response contained no text")]
    EmptyResponse,

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Truncate a model response for inclusion in log lines
pub(crate) fn truncate_for_log(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_CHARS).collect();
        format!("{truncated}...")
    }
}
