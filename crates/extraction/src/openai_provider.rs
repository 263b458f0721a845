//! OpenAI-compatible chat completion provider (OpenAI, vLLM, etc.)

use crate::error::{ExtractionError, Result};
use crate::provider::{ChatMessage, CompletionProvider, Role};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use lawabbr_core::LlmConfig;
use tracing::{debug, info};

/// Chat completion provider backed by `async-openai`
pub struct OpenAiCompletionProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiCompletionProvider {
    /// Create a provider from the completion service configuration
    ///
    /// An API key is required unless a custom base URL is configured, since
    /// self-hosted endpoints commonly accept unauthenticated requests.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let model = config.model.as_str().to_string();

        info!("Initializing OpenAI-compatible completion provider");
        info!("  Model: {model}");

        let mut openai_config = OpenAIConfig::new();

        if let Some(base_url) = &config.api_base_url {
            info!("  Base URL: {base_url}");
            openai_config = openai_config.with_api_base(base_url);
        }

        match config.resolve_api_key() {
            Some(api_key) => {
                openai_config = openai_config.with_api_key(api_key);
            }
            None if config.api_base_url.is_none() => {
                return Err(ExtractionError::Config(
                    "API key required. Set llm.api_key or OPENAI_API_KEY env var".to_string(),
                ));
            }
            None => debug!("No API key configured, sending unauthenticated requests"),
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model,
            temperature: config.temperature,
        })
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let built: std::result::Result<ChatCompletionRequestMessage, _> = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(Into::into),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(Into::into),
    };
    built.map_err(|e| ExtractionError::Completion(format!("Failed to build message: {e}")))
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone()).messages(request_messages);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        let request = args
            .build()
            .map_err(|e| ExtractionError::Completion(format!("Failed to build request: {e}")))?;

        debug!("Sending completion request with {} messages", messages.len());

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ExtractionError::Completion(format!("Chat API call failed: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExtractionError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawabbr_core::ModelName;

    #[test]
    fn test_new_with_explicit_key() {
        let config = LlmConfig {
            model: ModelName::O1Mini,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let provider = OpenAiCompletionProvider::new(&config).unwrap();
        assert_eq!(provider.model(), "o1-mini");
    }

    #[test]
    fn test_new_with_base_url_does_not_need_key() {
        let config = LlmConfig {
            api_base_url: Some("http://localhost:8000/v1".to_string()),
            ..Default::default()
        };
        assert!(OpenAiCompletionProvider::new(&config).is_ok());
    }

    #[test]
    fn test_request_message_roles() {
        let system = to_request_message(&ChatMessage::system("sys")).unwrap();
        let user = to_request_message(&ChatMessage::user("hi")).unwrap();
        assert!(matches!(system, ChatCompletionRequestMessage::System(_)));
        assert!(matches!(user, ChatCompletionRequestMessage::User(_)));
    }
}
