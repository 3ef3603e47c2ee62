//! Config file structure. Every section defaults so a missing or partial
//! `config.toml` still loads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assistant::OPENAI_API_BASE;
use crate::catalog::{DEFAULT_LOCALE, DEFAULT_VOICE};
use crate::speech::{DEFAULT_SPEECH_MODEL, ELEVENLABS_API_BASE};
use crate::translate::libre::LIBRETRANSLATE_BASE;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub turn: TurnConfig,
    pub translation: TranslationConfig,
    pub speech: SpeechConfig,
}

/// Hosted assistant connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssistantConfig {
    /// API key for the assistant service.
    pub api_key: Option<String>,
    /// Assistant the runs are started against.
    pub assistant_id: Option<String>,
    pub base_url: String,
    /// Replaces the built-in run instructions.
    pub instructions: Option<String>,
    /// Replaces the built-in persona block.
    pub persona: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            base_url: OPENAI_API_BASE.into(),
            instructions: None,
            persona: None,
        }
    }
}

/// Turn orchestration knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TurnConfig {
    /// Delay between run status checks.
    pub poll_interval_ms: u64,
    /// Give up on a run after this long. Unset polls until completion.
    pub run_timeout_secs: Option<u64>,
    pub default_locale: String,
    pub default_voice: String,
    /// Starting response-length hint (50, 100 or 200).
    pub default_limit: u32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1299,
            run_timeout_secs: None,
            default_locale: DEFAULT_LOCALE.into(),
            default_voice: DEFAULT_VOICE.into(),
            default_limit: 50,
        }
    }
}

/// Reply / placeholder translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    /// LibreTranslate-compatible server.
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: LIBRETRANSLATE_BASE.into(),
            api_key: None,
        }
    }
}

/// Reply speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpeechConfig {
    /// ElevenLabs key. Speech is unavailable without one.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_id: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: ELEVENLABS_API_BASE.into(),
            model_id: DEFAULT_SPEECH_MODEL.into(),
        }
    }
}
