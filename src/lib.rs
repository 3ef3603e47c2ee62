//! Bight: a conversational front-end for a hosted assistant.
//!
//! The library owns one conversational turn at a time: it appends the user's
//! query to a server-side thread, starts a run, polls the run to completion,
//! then parses the newest assistant reply into prose and an optional code
//! fragment, translating the prose when a non-default locale is selected.
//!
//! ## Design
//! - Trait-driven collaborators (`AssistantService`, `Translator`,
//!   `SpeechSynthesizer`) so the controller can be driven by fakes in tests
//! - Pure reply parsing (`reply`) kept separate from I/O
//! - Polling behind an injected `Clock` so time can be simulated
//! - The binary in `main.rs` is the presentation layer

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod reply;
pub mod speech;
pub mod translate;
pub mod turn;

pub use config::Config;
pub use turn::{LengthHint, TurnController, TurnError, TurnPhase, TurnState};
