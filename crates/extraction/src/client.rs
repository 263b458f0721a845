//! Extraction client: prompt, complete, validate

use crate::error::{truncate_for_log, Result};
use crate::prompts;
use crate::provider::{ChatMessage, CompletionProvider};
use crate::response::parse_pairs;
use lawabbr_core::{AbbrPair, Config, FewShotType};
use std::sync::Arc;
use tracing::debug;

/// Prompt settings fixed for the lifetime of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSettings {
    pub few_shot: FewShotType,
    /// Send the instruction as a separate system-role message
    pub system_role: bool,
}

impl ExtractionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            few_shot: config.extraction.few_shot,
            system_role: config.llm.uses_system_role(),
        }
    }
}

/// Extracts formal-name / abbreviation pairs from one excerpt at a time
pub struct ExtractionClient {
    provider: Arc<dyn CompletionProvider>,
    settings: ExtractionSettings,
}

impl ExtractionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: ExtractionSettings) -> Self {
        Self { provider, settings }
    }

    /// Messages that would be sent for `text`
    pub fn render_messages(&self, text: &str) -> Vec<ChatMessage> {
        prompts::build_messages(text, self.settings.few_shot, self.settings.system_role)
    }

    /// Extract pairs from `text`.
    ///
    /// `Ok(vec![])` means the model answered but no usable pair was found.
    /// `Err` means no answer was obtained (request failure or non-JSON text)
    /// and the excerpt should be retried later.
    pub async fn extract(&self, text: &str) -> Result<Vec<AbbrPair>> {
        let messages = self.render_messages(text);
        let raw = self.provider.complete(&messages).await?;
        debug!(
            "Raw response from {}: {}",
            self.provider.model(),
            truncate_for_log(&raw)
        );
        parse_pairs(&raw)
    }
}
