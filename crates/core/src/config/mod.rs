//! Configuration module for lawabbr
//!
//! Configuration is explicit: it is loaded once, optionally overridden from the
//! command line, and then handed to the extraction client and the checkpoint
//! store at construction time. Nothing reads it as ambient state.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use defaults::*;

/// Returns the path to the global configuration file (`~/.lawabbr/config.toml`)
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".lawabbr").join("config.toml"))
}

/// Completion models the harness is evaluated against
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum ModelName {
    #[serde(rename = "o1-mini")]
    #[strum(serialize = "o1-mini")]
    O1Mini,
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
}

impl ModelName {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether the model accepts a separate system-role message.
    ///
    /// The o1 family rejects the system role, so the instruction has to be
    /// folded into the user message.
    pub fn supports_system_role(self) -> bool {
        !self.as_str().contains("o1")
    }
}

/// Which fixed set of worked examples is prepended to the prompt
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FewShotType {
    /// No examples
    None,
    /// Baseline set of three definition patterns
    Nakamura,
    /// Baseline set plus a nested-reference example
    #[default]
    Our,
}

impl FewShotType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion service configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Prompt configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Configuration for the completion service
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier sent with every request
    #[serde(default)]
    pub model: ModelName,

    /// Base URL of an OpenAI-compatible API (defaults to the public endpoint)
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// API key (or use the OPENAI_API_KEY env var)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Force the system-role channel on or off; derived from the model when unset
    #[serde(default)]
    pub system_role: Option<bool>,

    /// Sampling temperature; omitted from requests when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***REDACTED***"))
            .field("system_role", &self.system_role)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
    }

    /// Whether requests carry a separate system-role message
    pub fn uses_system_role(&self) -> bool {
        self.system_role
            .unwrap_or_else(|| self.model.supports_system_role())
    }
}

/// Prompt configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub few_shot: FewShotType,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Annotated dataset (JSON array)
    #[serde(default = "default_input_file")]
    pub input_file: PathBuf,

    /// Directory receiving the checkpoint / result files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Result file for this configuration.
    ///
    /// Model and few-shot variant are both part of the name, so two
    /// configurations never share a checkpoint.
    pub fn output_path(&self) -> PathBuf {
        self.paths.output_dir.join(format!(
            "extracted_results_{}_{}.json",
            self.llm.model.as_str(),
            self.extraction.few_shot.as_str()
        ))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.paths.input_file.as_os_str().is_empty() {
            return Err(Error::config("paths.input_file must not be empty"));
        }

        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(Error::config("paths.output_dir must not be empty"));
        }

        if let Some(url) = &self.llm.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config(format!(
                    "llm.api_base_url must start with http:// or https:// (got '{url}')"
                )));
            }
        }

        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(Error::config(format!(
                    "llm.temperature must be between 0.0 and 2.0 (got {temperature})"
                )));
            }
        }

        Ok(())
    }
}
