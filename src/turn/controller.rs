//! Turn controller: sequences one round trip per submission.
//!
//! 1. `start_session`: create the thread once
//! 2. `submit`: append the user message and start a run
//! 3. `poll_run`: check the run on a fixed period until it completes
//! 4. `harvest_reply`: list messages, parse the reply, translate the prose
//!
//! Service failures are logged and returned to the caller for display. The
//! turn is not rolled back: it stays waiting until the caller resets it.

use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, TokioClock};
use super::persona;
use super::{LengthHint, TurnError, TurnState};
use crate::assistant::{AssistantService, Role, RunId, RunRequest, RunStatus, ThreadId};
use crate::catalog;
use crate::config::Config;
use crate::reply;
use crate::translate::{Translator, SOURCE_LOCALE};

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A run was started.
    Started(RunId),
    /// A turn was already in flight; nothing was sent.
    Rejected,
}

/// Static settings for a controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub assistant_id: String,
    pub instructions: String,
    pub persona: String,
    pub poll_interval: Duration,
    /// Status checks allowed per run; `None` polls until completion.
    pub max_polls: Option<u32>,
    pub default_locale: String,
    pub default_voice: String,
    pub default_limit: LengthHint,
}

impl ControllerSettings {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            instructions: persona::INSTRUCTIONS.to_string(),
            persona: persona::PERSONA.to_string(),
            poll_interval: Duration::from_millis(1299),
            max_polls: None,
            default_locale: catalog::DEFAULT_LOCALE.to_string(),
            default_voice: catalog::DEFAULT_VOICE.to_string(),
            default_limit: LengthHint::Short,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut settings = Self::new(config.assistant.assistant_id.clone().unwrap_or_default());
        if let Some(ref text) = config.assistant.instructions {
            settings.instructions = text.clone();
        }
        if let Some(ref text) = config.assistant.persona {
            settings.persona = text.clone();
        }
        settings.poll_interval = config.poll_interval();
        settings.max_polls = config.max_polls();
        settings.default_locale = config.turn.default_locale.clone();
        settings.default_voice = config.turn.default_voice.clone();
        settings.default_limit =
            LengthHint::from_words(config.turn.default_limit).unwrap_or_default();
        settings
    }
}

/// Owns the thread and the turn record.
pub struct TurnController {
    assistant: Arc<dyn AssistantService>,
    translator: Arc<dyn Translator>,
    clock: Arc<dyn Clock>,
    settings: ControllerSettings,
    thread: Option<ThreadId>,
    state: TurnState,
}

impl TurnController {
    pub fn new(
        assistant: Arc<dyn AssistantService>,
        translator: Arc<dyn Translator>,
        settings: ControllerSettings,
    ) -> Self {
        let state = TurnState::new(
            settings.default_locale.clone(),
            settings.default_voice.clone(),
            settings.default_limit,
        );
        Self {
            assistant,
            translator,
            clock: Arc::new(TokioClock),
            settings,
            thread: None,
            state,
        }
    }

    /// Replace the polling clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn thread(&self) -> Option<&ThreadId> {
        self.thread.as_ref()
    }

    // ── Session ──────────────────────────────────────────────────

    /// Create the conversation thread unless one exists. Failures are logged
    /// and not retried; a later `submit` then reports `NoThread`.
    pub async fn start_session(&mut self) {
        if self.thread.is_some() {
            return;
        }

        match self.assistant.create_thread().await {
            Ok(thread) => {
                tracing::info!(thread_id = %thread, "Conversation session started");
                self.thread = Some(thread);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create conversation thread");
            }
        }
    }

    // ── Turn ─────────────────────────────────────────────────────

    /// Send `query` and start a run. Refused while a turn is waiting.
    pub async fn submit(
        &mut self,
        query: &str,
        limit: LengthHint,
    ) -> Result<Submission, TurnError> {
        if self.state.is_waiting() {
            tracing::debug!("Submission refused: a turn is already in flight");
            return Ok(Submission::Rejected);
        }
        let thread = self.thread.clone().ok_or(TurnError::NoThread)?;

        self.state.begin(query);

        let content = persona::user_content(query, limit);
        if let Err(e) = self
            .assistant
            .append_message(&thread, Role::User, &content)
            .await
        {
            tracing::error!(thread_id = %thread, error = %e, "Failed to append user message");
            return Err(e.into());
        }

        let request = RunRequest {
            assistant_id: self.settings.assistant_id.clone(),
            instructions: self.settings.instructions.clone(),
            persona: self.settings.persona.clone(),
        };
        let run = match self.assistant.create_run(&thread, &request).await {
            Ok(run) => run,
            Err(e) => {
                tracing::error!(thread_id = %thread, error = %e, "Failed to start run");
                return Err(e.into());
            }
        };

        tracing::info!(
            thread_id = %thread,
            run_id = %run.id,
            limit = limit.words(),
            "Run started"
        );
        Ok(Submission::Started(run.id))
    }

    /// Check `run` every poll interval until it completes, then harvest.
    ///
    /// Any status other than `completed` keeps polling, `failed` included.
    /// Without a poll budget a run that never completes polls forever.
    pub async fn poll_run(&mut self, run: &RunId) -> Result<(), TurnError> {
        let thread = self.thread.clone().ok_or(TurnError::NoThread)?;
        let mut ticker = self.clock.ticker(self.settings.poll_interval);
        let mut polls: u32 = 0;

        loop {
            ticker.tick().await;
            polls = polls.saturating_add(1);

            let status = match self.assistant.get_run(&thread, run).await {
                Ok(snapshot) => snapshot.status,
                Err(e) => {
                    tracing::error!(run_id = %run, polls, error = %e, "Failed to poll run");
                    return Err(e.into());
                }
            };

            if status == RunStatus::Completed {
                tracing::info!(run_id = %run, polls, "Run completed");
                break;
            }
            tracing::debug!(run_id = %run, polls, status = status.as_str(), "Run pending");

            if let Some(max) = self.settings.max_polls {
                if polls >= max {
                    tracing::warn!(run_id = %run, polls, "Run poll budget exhausted");
                    return Err(TurnError::TimedOut {
                        run_id: run.clone(),
                        polls,
                    });
                }
            }
        }

        drop(ticker);
        self.harvest_reply().await
    }

    /// Pull the newest assistant reply into the turn state.
    pub async fn harvest_reply(&mut self) -> Result<(), TurnError> {
        let thread = self.thread.clone().ok_or(TurnError::NoThread)?;

        let messages = match self.assistant.list_messages(&thread).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::error!(thread_id = %thread, error = %e, "Failed to list messages");
                return Err(e.into());
            }
        };

        let raw = reply::select_reply(&messages, &self.state.submitted_query);
        let mut parsed = reply::parse_reply(raw);
        if parsed.prose.is_empty() && parsed.code.is_none() {
            tracing::warn!(thread_id = %thread, "No assistant reply found in thread");
        }

        let locale = self.state.locale.clone();
        parsed.prose = self.translate_or_keep(&locale, parsed.prose).await;

        tracing::debug!(
            thread_id = %thread,
            messages = messages.len(),
            has_code = parsed.code.is_some(),
            "Reply harvested"
        );
        self.state.resolve(parsed, messages);
        Ok(())
    }

    /// Submit, poll to completion and harvest in one call.
    pub async fn run_turn(
        &mut self,
        query: &str,
        limit: LengthHint,
    ) -> Result<Submission, TurnError> {
        let submission = self.submit(query, limit).await?;
        if let Submission::Started(ref run) = submission {
            self.poll_run(run).await?;
        }
        Ok(submission)
    }

    /// Abandon a stuck turn. The thread is kept.
    pub fn reset(&mut self) {
        if self.state.is_waiting() {
            tracing::info!("Abandoning in-flight turn");
        }
        self.state.abandon();
    }

    // ── Form controls ────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Advance the length hint and return the new value.
    pub fn cycle_limit(&mut self) -> LengthHint {
        self.state.limit = self.state.limit.next();
        self.state.limit
    }

    pub fn select_voice(&mut self, voice: impl Into<String>) {
        self.state.voice = voice.into();
    }

    /// Switch the reply locale and translate the input placeholder into it.
    pub async fn select_locale(&mut self, locale: &str) -> &str {
        self.state.locale = locale.to_string();
        let placeholder = self
            .translate_or_keep(locale, persona::PLACEHOLDER.to_string())
            .await;
        self.state.placeholder = placeholder;
        &self.state.placeholder
    }

    /// Fill the draft with a sample query and pick a random voice.
    pub fn randomize(&mut self) {
        self.state.query = catalog::random_query().to_string();
        self.state.voice = catalog::random_voice().name.to_string();
    }

    /// Translate from the source locale, keeping `text` on failure.
    async fn translate_or_keep(&self, locale: &str, text: String) -> String {
        if locale == SOURCE_LOCALE || text.is_empty() {
            return text;
        }
        match self.translator.translate(SOURCE_LOCALE, locale, &text).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(locale, error = %e, "Translation failed, keeping original text");
                text
            }
        }
    }
}
