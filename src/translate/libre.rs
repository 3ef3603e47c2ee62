//! LibreTranslate-compatible HTTP translator.
//!
//! `POST {base}/translate` with `{"q", "source", "target", "format": "text"}`,
//! answered by `{"translatedText": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Translator;

/// Public LibreTranslate instance.
pub const LIBRETRANSLATE_BASE: &str = "https://libretranslate.com";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for a LibreTranslate server.
pub struct LibreTranslateClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl LibreTranslateClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, source: &str, target: &str, text: &str) -> anyhow::Result<String> {
        if source == target || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let resp = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Translation API error {}: {}", status, body);
        }

        let parsed: TranslateResponse = resp.json().await?;
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn translates_via_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "Comment puis-je aider ?"})),
            )
            .mount(&server)
            .await;

        let client = LibreTranslateClient::new(server.uri(), Some("key-1".into())).unwrap();
        let out = client.translate("en", "fr", "How can I help?").await.unwrap();
        assert_eq!(out, "Comment puis-je aider ?");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["q"], "How can I help?");
        assert_eq!(body["source"], "en");
        assert_eq!(body["target"], "fr");
        assert_eq!(body["format"], "text");
        assert_eq!(body["api_key"], "key-1");
    }

    #[tokio::test]
    async fn same_locale_skips_the_network() {
        let server = MockServer::start().await;
        let client = LibreTranslateClient::new(server.uri(), None).unwrap();
        let out = client.translate("en", "en", "hello").await.unwrap();
        assert_eq!(out, "hello");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad language"))
            .mount(&server)
            .await;

        let client = LibreTranslateClient::new(server.uri(), None).unwrap();
        let err = client.translate("en", "xx", "hello").await.unwrap_err();
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad language"));
    }
}
