//! Abbreviation extraction through a text-completion service
//!
//! This crate turns a legal-text excerpt into a list of formal-name /
//! abbreviation pairs: it builds the prompt, calls a [`CompletionProvider`],
//! strips code fences and validates the JSON answer.
//!
//! # Public API
//!
//! - [`ExtractionClient`] - extracts pairs from one excerpt
//! - [`CompletionProvider`] - completion service abstraction
//! - [`OpenAiCompletionProvider`] / [`MockCompletionProvider`] - providers
//! - [`create_completion_provider`] - factory from configuration
//! - [`ExtractionError`] - the failure arm of an extraction

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod client;
pub mod error;
mod mock_provider;
mod openai_provider;
pub mod prompts;
pub mod provider;
pub mod response;

use lawabbr_core::LlmConfig;
use std::sync::Arc;

pub use client::{ExtractionClient, ExtractionSettings};
pub use error::ExtractionError;
pub use mock_provider::MockCompletionProvider;
pub use openai_provider::OpenAiCompletionProvider;
pub use provider::{ChatMessage, CompletionProvider, Role};

/// Create the completion provider described by the configuration
pub fn create_completion_provider(
    config: &LlmConfig,
) -> error::Result<Arc<dyn CompletionProvider>> {
    Ok(Arc::new(OpenAiCompletionProvider::new(config)?))
}
