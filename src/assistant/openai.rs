//! OpenAI Assistants (v2) REST client.
//!
//! ## Endpoints
//!
//! - `POST /threads`: create a thread
//! - `POST /threads/{thread}/messages`: append a message
//! - `POST /threads/{thread}/runs`: start a run
//! - `GET  /threads/{thread}/runs/{run}`: poll a run
//! - `GET  /threads/{thread}/messages?order=asc`: list messages (paged)
//!
//! Every request carries `Authorization: Bearer <key>` and
//! `OpenAI-Beta: assistants=v2`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::traits::{AssistantError, AssistantService};
use super::types::{Message, Role, Run, RunId, RunRequest, ThreadId};

/// Default API root.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Beta header value required by the Assistants API.
const ASSISTANTS_BETA: &str = "assistants=v2";

/// Page size used when listing thread messages.
const MESSAGE_PAGE_LIMIT: u32 = 100;

// ── Request / response bodies ────────────────────────────────────

#[derive(Debug, Serialize)]
struct CreateMessageBody<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunBody<'a> {
    assistant_id: &'a str,
    instructions: &'a str,
    additional_instructions: &'a str,
}

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessagePage {
    #[serde(default)]
    data: Vec<Message>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    last_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ── Client ───────────────────────────────────────────────────────

/// HTTP client for the OpenAI Assistants API.
pub struct OpenAiAssistantClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiAssistantClient {
    /// Create a new client against `base_url` (no trailing slash needed).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    /// Send a request and decode a 2xx JSON body, mapping error statuses.
    async fn send_json<T: serde::de::DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, AssistantError> {
        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AssistantError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AssistantService for OpenAiAssistantClient {
    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let thread: ThreadObject =
            Self::send_json(self.post("/threads").json(&serde_json::json!({}))).await?;
        tracing::debug!(thread_id = %thread.id, "Created assistant thread");
        Ok(ThreadId(thread.id))
    }

    async fn append_message(
        &self,
        thread: &ThreadId,
        role: Role,
        text: &str,
    ) -> Result<(), AssistantError> {
        let body = CreateMessageBody {
            role: role.as_str(),
            content: text,
        };
        let _: serde_json::Value = Self::send_json(
            self.post(&format!("/threads/{thread}/messages"))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        request: &RunRequest,
    ) -> Result<Run, AssistantError> {
        let body = CreateRunBody {
            assistant_id: &request.assistant_id,
            instructions: &request.instructions,
            additional_instructions: &request.persona,
        };
        Self::send_json(self.post(&format!("/threads/{thread}/runs")).json(&body)).await
    }

    async fn get_run(&self, thread: &ThreadId, run: &RunId) -> Result<Run, AssistantError> {
        Self::send_json(self.get(&format!("/threads/{thread}/runs/{run}"))).await
    }

    async fn list_messages(&self, thread: &ThreadId) -> Result<Vec<Message>, AssistantError> {
        let mut messages = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let mut query = vec![
                ("order", "asc".to_string()),
                ("limit", MESSAGE_PAGE_LIMIT.to_string()),
            ];
            if let Some(ref cursor) = after {
                query.push(("after", cursor.clone()));
            }

            let page: MessagePage = Self::send_json(
                self.get(&format!("/threads/{thread}/messages"))
                    .query(&query),
            )
            .await?;

            let next = page
                .last_id
                .clone()
                .or_else(|| page.data.last().map(|m| m.id.clone()))
                .filter(|id| !id.is_empty());
            messages.extend(page.data);

            match next {
                Some(cursor) if page.has_more => after = Some(cursor),
                _ => break,
            }
        }

        Ok(messages)
    }
}
