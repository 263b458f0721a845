//! Trait definition for completion providers

use crate::error::Result;
use async_trait::async_trait;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One role-tagged message of a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for text-completion services
///
/// The provider is a black box: it receives an ordered list of messages and
/// returns the raw text of the first completion. Transport failures and
/// malformed API responses are reported as errors.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for the given messages
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Model identifier sent with every request
    fn model(&self) -> &str;
}
