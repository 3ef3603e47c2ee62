//! One conversational turn: state, transitions and orchestration.
//!
//! ```text
//! Idle ──submit──▸ Waiting ──poll (≠ completed)──▸ Waiting
//!                     │
//!                     └──completed ▸ harvest ▸ Ready ──submit──▸ Waiting
//! ```
//!
//! [`TurnState`] is a plain value; its transition methods do no I/O. The
//! [`TurnController`] owns the state and the thread and performs the calls.

pub mod clock;
pub mod controller;
pub mod persona;

pub use clock::{Clock, ImmediateClock, Ticker, TokioClock};
pub use controller::{ControllerSettings, Submission, TurnController};

use crate::assistant::{AssistantError, Message, RunId};
use crate::reply::Reply;

// ── Length hint ──────────────────────────────────────────────────

/// Requested response length, cycled by a UI control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthHint {
    #[default]
    Short,
    Medium,
    Long,
}

impl LengthHint {
    /// Word budget sent to the assistant.
    pub fn words(self) -> u32 {
        match self {
            Self::Short => 50,
            Self::Medium => 100,
            Self::Long => 200,
        }
    }

    /// 50 → 100 → 200 → 50 …
    pub fn next(self) -> Self {
        match self {
            Self::Short => Self::Medium,
            Self::Medium => Self::Long,
            Self::Long => Self::Short,
        }
    }

    pub fn from_words(words: u32) -> Option<Self> {
        match words {
            50 => Some(Self::Short),
            100 => Some(Self::Medium),
            200 => Some(Self::Long),
            _ => None,
        }
    }
}

impl std::fmt::Display for LengthHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words())
    }
}

// ── Turn state ───────────────────────────────────────────────────

/// Lifecycle of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// Nothing submitted yet, or the last turn was abandoned.
    #[default]
    Idle,
    /// A run is in flight; new submissions are refused.
    Waiting,
    /// A reply has been harvested.
    Ready,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    /// Draft query in the input box.
    pub query: String,
    /// Input hint, translated into the selected locale.
    pub placeholder: String,
    pub limit: LengthHint,
    /// Target locale code for replies.
    pub locale: String,
    /// Selected voice name.
    pub voice: String,
    /// Query text of the turn in flight or last resolved.
    pub submitted_query: String,
    /// Displayed prose.
    pub reply: String,
    /// Code fragment offered for preview and download.
    pub code: Option<String>,
    pub phase: TurnPhase,
    pub submitted: bool,
    pub reply_visible: bool,
    pub audio_ready: bool,
    /// Thread transcript as of the last harvest.
    pub messages: Vec<Message>,
}

impl TurnState {
    pub fn new(locale: impl Into<String>, voice: impl Into<String>, limit: LengthHint) -> Self {
        Self {
            placeholder: persona::PLACEHOLDER.to_string(),
            locale: locale.into(),
            voice: voice.into(),
            limit,
            ..Self::default()
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == TurnPhase::Waiting
    }

    /// Accept `query` as the new turn: enter waiting, hide the previous
    /// reply and audio, clear the draft.
    pub fn begin(&mut self, query: &str) {
        self.submitted_query = query.to_string();
        self.query.clear();
        self.phase = TurnPhase::Waiting;
        self.submitted = true;
        self.reply_visible = false;
        self.audio_ready = false;
    }

    /// Store a harvested reply and leave the waiting phase.
    pub fn resolve(&mut self, reply: Reply, messages: Vec<Message>) {
        self.reply = reply.prose;
        self.code = reply.code;
        self.messages = messages;
        self.phase = TurnPhase::Ready;
        self.reply_visible = true;
        self.audio_ready = true;
    }

    /// Abandon the current turn without touching the thread.
    pub fn abandon(&mut self) {
        self.phase = TurnPhase::Idle;
        self.submitted = false;
    }
}

// ── Errors ───────────────────────────────────────────────────────

/// Alert text shown for any assistant-service failure.
pub const SERVICE_ALERT: &str = "API error or no keys provided";

/// Failure of a turn operation.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("no conversation thread; the session has not started")]
    NoThread,

    #[error("assistant service call failed: {0}")]
    Assistant(#[from] AssistantError),

    #[error("run {run_id} did not complete after {polls} status checks")]
    TimedOut { run_id: RunId, polls: u32 },
}

impl TurnError {
    /// Short message for a blocking user notification.
    pub fn alert(&self) -> &'static str {
        match self {
            Self::NoThread | Self::Assistant(_) => SERVICE_ALERT,
            Self::TimedOut { .. } => "The assistant is taking too long to answer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_hint_cycles_from_any_start() {
        for start in [LengthHint::Short, LengthHint::Medium, LengthHint::Long] {
            let mut hint = start;
            let mut seen = Vec::new();
            for _ in 0..6 {
                hint = hint.next();
                seen.push(hint.words());
            }
            let expected: Vec<u32> = match start {
                LengthHint::Short => vec![100, 200, 50, 100, 200, 50],
                LengthHint::Medium => vec![200, 50, 100, 200, 50, 100],
                LengthHint::Long => vec![50, 100, 200, 50, 100, 200],
            };
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn length_hint_from_words() {
        assert_eq!(LengthHint::from_words(100), Some(LengthHint::Medium));
        assert_eq!(LengthHint::from_words(75), None);
        assert_eq!(LengthHint::default().words(), 50);
        assert_eq!(LengthHint::Long.to_string(), "200");
    }

    #[test]
    fn begin_enters_waiting_and_resets_form() {
        let mut state = TurnState::new("en", "🍿", LengthHint::Short);
        state.query = "draft".into();
        state.audio_ready = true;
        state.reply_visible = true;

        state.begin("draft");
        assert!(state.is_waiting());
        assert!(state.query.is_empty());
        assert_eq!(state.submitted_query, "draft");
        assert!(!state.audio_ready);
        assert!(!state.reply_visible);
    }

    #[test]
    fn resolve_clears_waiting_and_enables_audio() {
        let mut state = TurnState::new("en", "🍿", LengthHint::Short);
        state.begin("q");
        state.resolve(
            Reply {
                prose: "answer".into(),
                code: Some("<p/>".into()),
            },
            vec![],
        );
        assert_eq!(state.phase, TurnPhase::Ready);
        assert_eq!(state.reply, "answer");
        assert_eq!(state.code.as_deref(), Some("<p/>"));
        assert!(state.audio_ready);
        assert!(state.reply_visible);
    }

    #[test]
    fn abandon_returns_to_idle() {
        let mut state = TurnState::new("en", "🍿", LengthHint::Short);
        state.begin("q");
        state.abandon();
        assert_eq!(state.phase, TurnPhase::Idle);
        assert!(!state.is_waiting());
    }

    #[test]
    fn new_state_uses_source_placeholder() {
        let state = TurnState::new("fr", "Josh", LengthHint::Long);
        assert_eq!(state.placeholder, persona::PLACEHOLDER);
        assert_eq!(state.phase, TurnPhase::Idle);
    }
}
