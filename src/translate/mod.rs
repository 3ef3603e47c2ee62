//! Text translation collaborator.
//!
//! Translation is best-effort: callers in the turn controller keep the
//! original text when a translator fails.

pub mod libre;

pub use libre::LibreTranslateClient;

use async_trait::async_trait;

/// Locale the assistant answers in and the UI text is authored in.
pub const SOURCE_LOCALE: &str = "en";

/// Translates text between locales.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target` locale.
    async fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<String>;
}

/// Returns the input unchanged. Used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, _source: &str, _target: &str, text: &str) -> anyhow::Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passthrough_returns_input() {
        let out = PassthroughTranslator
            .translate("en", "fr", "How can I help?")
            .await
            .unwrap();
        assert_eq!(out, "How can I help?");
    }
}
