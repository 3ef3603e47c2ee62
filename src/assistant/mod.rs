//! Hosted assistant backend: threads, messages and runs.
//!
//! ## Design
//! - [`AssistantService`] is the seam the turn controller depends on
//! - [`OpenAiAssistantClient`] speaks the OpenAI Assistants v2 REST API
//! - Wire types live in [`types`] and are shared by every backend

pub mod openai;
pub mod traits;
pub mod types;

pub use openai::{OpenAiAssistantClient, OPENAI_API_BASE};
pub use traits::{AssistantError, AssistantService};
pub use types::{ContentBlock, Message, Role, Run, RunId, RunRequest, RunStatus, ThreadId};
