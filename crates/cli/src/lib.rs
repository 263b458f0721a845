//! Library interface for the lawabbr CLI
//!
//! This module exposes the configuration and rendering helpers used by the
//! binary so they can be exercised from integration tests.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use lawabbr_core::{Config, FewShotType, ModelName};
use lawabbr_extraction::{ChatMessage, Role};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Settings given on the command line; each one wins over every config layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub model: Option<ModelName>,
    pub few_shot: Option<FewShotType>,
    pub input_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(few_shot) = self.few_shot {
            config.extraction.few_shot = few_shot;
        }
        if let Some(input_file) = &self.input_file {
            config.paths.input_file = input_file.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.paths.output_dir = output_dir.clone();
        }
    }
}

/// Load the layered configuration, apply command-line overrides and validate
pub fn load_config(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Human-readable dump of a request, one section per message
pub fn render_messages(messages: &[ChatMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
        };
        // Writing into a String cannot fail
        let _ = writeln!(out, "----- {role} -----");
        let _ = writeln!(out, "{}", message.content);
    }
    out
}
