//! Trait definition for the hosted assistant backend.
//!
//! The turn controller only ever talks to an [`AssistantService`]; the
//! OpenAI Assistants client is one implementation, test fakes are another.

use async_trait::async_trait;

use super::types::{Message, Role, Run, RunId, RunRequest, ThreadId};

/// Failure of a call against the assistant service.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response from assistant API: {0}")]
    Decode(String),
}

/// Conversational-thread API.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Create a fresh server-side thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Append a message to a thread.
    async fn append_message(
        &self,
        thread: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run of the configured assistant against a thread.
    async fn create_run(&self, thread: &ThreadId, request: &RunRequest)
        -> Result<Run, AssistantError>;

    /// Fetch the current state of a run.
    async fn get_run(&self, thread: &ThreadId, run: &RunId) -> Result<Run, AssistantError>;

    /// List the thread's messages, oldest first.
    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<Message>, AssistantError>;
}
