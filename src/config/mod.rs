//! Configuration loading.
//!
//! Resolution order: built-in defaults, then `~/.bight/config.toml` (or an
//! explicit path), then environment variables.

pub mod schema;

pub use schema::{AssistantConfig, Config, SpeechConfig, TranslationConfig, TurnConfig};

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::turn::LengthHint;

/// Directory under the home directory holding the config file.
const CONFIG_DIR: &str = ".bight";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// `~/.bight/config.toml`, falling back to a relative `.bight` when no
    /// home directory can be resolved.
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_DIR))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR))
            .join(CONFIG_FILE)
    }

    /// Parse a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` (or the default location) and apply env overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from the environment. `lookup` is injected so tests
    /// do not touch process state.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.assistant.api_key = Some(key);
        }
        if let Some(id) = get("BIGHT_ASSISTANT_ID") {
            self.assistant.assistant_id = Some(id);
        }
        if let Some(url) = get("BIGHT_TRANSLATE_URL") {
            self.translation.base_url = url;
        }
        if let Some(key) = get("BIGHT_TRANSLATE_API_KEY") {
            self.translation.api_key = Some(key);
        }
        if let Some(key) = get("ELEVENLABS_API_KEY") {
            self.speech.api_key = Some(key);
        }
    }

    /// Check everything a turn needs before any request is made.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.turn.poll_interval_ms == 0 {
            anyhow::bail!("turn.poll_interval_ms must be greater than zero");
        }
        if LengthHint::from_words(self.turn.default_limit).is_none() {
            anyhow::bail!(
                "turn.default_limit must be one of 50, 100 or 200 (got {})",
                self.turn.default_limit
            );
        }
        if self.assistant.api_key.as_deref().unwrap_or("").is_empty() {
            anyhow::bail!("No assistant API key configured. Set OPENAI_API_KEY or assistant.api_key");
        }
        if self.assistant.assistant_id.as_deref().unwrap_or("").is_empty() {
            anyhow::bail!(
                "No assistant id configured. Set BIGHT_ASSISTANT_ID or assistant.assistant_id"
            );
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.turn.poll_interval_ms)
    }

    /// Poll budget derived from `run_timeout_secs`; `None` means unbounded.
    pub fn max_polls(&self) -> Option<u32> {
        let timeout_ms = self.turn.run_timeout_secs?.saturating_mul(1000);
        let interval = self.turn.poll_interval_ms.max(1);
        let polls = timeout_ms.div_ceil(interval).max(1);
        Some(u32::try_from(polls).unwrap_or(u32::MAX))
    }

    /// JSON schema of the config file.
    pub fn json_schema() -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(schemars::schema_for!(Config))
    }
}
