//! Text-to-speech for assistant replies.
//!
//! ## Design
//! - [`SpeechSynthesizer`] turns prose into encoded audio bytes
//! - [`ElevenLabsClient`] calls `POST /v1/text-to-speech/{voice_id}`
//! - Voices come from [`crate::catalog`]; the silent category never reaches here

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Default ElevenLabs API root.
pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";

/// Default synthesis model.
pub const DEFAULT_SPEECH_MODEL: &str = "eleven_multilingual_v2";

/// Synthesized audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    /// MIME type reported by the provider.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Speech synthesis backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, voice_id: &str, text: &str) -> anyhow::Result<SpeechAudio>;
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs text-to-speech client.
pub struct ElevenLabsClient {
    api_key: String,
    base_url: String,
    model_id: String,
    http: reqwest::Client,
}

impl ElevenLabsClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model_id: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            http,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, voice_id: &str, text: &str) -> anyhow::Result<SpeechAudio> {
        if voice_id.is_empty() {
            anyhow::bail!("No voice selected for speech synthesis");
        }

        let resp = self
            .http
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, voice_id))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&SynthesisRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Speech API error {}: {}", status, body);
        }

        let mime = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();

        tracing::debug!(voice_id, bytes = bytes.len(), "Synthesized reply audio");
        Ok(SpeechAudio { mime, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn synthesize_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/voice-1"))
            .and(header("xi-api-key", "el-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0xFF, 0xFB, 0x90]),
            )
            .mount(&server)
            .await;

        let client = ElevenLabsClient::new("el-key", server.uri(), DEFAULT_SPEECH_MODEL).unwrap();
        let audio = client.synthesize("voice-1", "hello").await.unwrap();
        assert_eq!(audio.bytes, vec![0xFF, 0xFB, 0x90]);
        assert_eq!(audio.mime, "audio/mpeg");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["text"], "hello");
        assert_eq!(body["model_id"], DEFAULT_SPEECH_MODEL);
    }

    #[tokio::test]
    async fn empty_voice_is_rejected_locally() {
        let server = MockServer::start().await;
        let client = ElevenLabsClient::new("el-key", server.uri(), DEFAULT_SPEECH_MODEL).unwrap();
        let err = client.synthesize("", "hello").await.unwrap_err();
        assert!(err.to_string().contains("No voice"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/voice-1"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = ElevenLabsClient::new("bad", server.uri(), DEFAULT_SPEECH_MODEL).unwrap();
        let err = client.synthesize("voice-1", "hello").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
