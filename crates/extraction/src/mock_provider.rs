//! Mock completion provider for testing

use crate::error::Result;
use crate::provider::{ChatMessage, CompletionProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

type Handler = Box<dyn Fn(&[ChatMessage]) -> Result<String> + Send + Sync>;

/// Mock provider that answers every request with a caller-supplied closure
pub struct MockCompletionProvider {
    handler: Handler,
    calls: AtomicUsize,
}

impl MockCompletionProvider {
    /// Create a mock whose responses are computed from the request messages
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same text
    pub fn with_response(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::new(move |_| Ok(response.clone()))
    }

    /// Number of completion requests received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(messages)
    }

    fn model(&self) -> &str {
        "mock"
    }
}
