//! Default values and functions for configuration

use std::path::PathBuf;

// Default constants
pub(crate) const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub(crate) const DEFAULT_FEW_SHOT: &str = "our";
pub(crate) const DEFAULT_INPUT_FILE: &str = "../law_text/choise_rand.json";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "../extracted_results";
pub(crate) const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub(crate) const ENV_PREFIX: &str = "LAWABBR";

pub(crate) fn default_input_file() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}
