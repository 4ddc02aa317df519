use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::models::TranslationConfig;
use crate::domain::ports::translator::{Result as PortResult, Translator};

/// Errors from the translation endpoint
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Endpoint returned a non-success status
    #[error("Translation endpoint returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Response body did not have the expected nested-array shape
    #[error("Unexpected translation payload: {0}")]
    UnexpectedPayload(String),
}

/// Client for the public Google translate `gtx` endpoint.
///
/// One request performs one hop. The endpoint is unauthenticated and
/// returns a nested JSON array whose first element lists translated
/// segments; the segments are concatenated into the result.
pub struct GoogleTranslateClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn from_config(config: &TranslationConfig) -> Result<Self, TranslateError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TranslateError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    async fn fetch(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url);
        debug!(source, target, chars = text.chars().count(), "translation hop");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::HttpStatus(status));
        }

        let payload: Value = response.json().await?;
        extract_translation(&payload)
    }
}

/// Pull the translated segments out of the gtx payload and join them.
fn extract_translation(payload: &Value) -> Result<String, TranslateError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::UnexpectedPayload(payload.to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::UnexpectedPayload(
            "payload contained no translated segments".to_string(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> PortResult<String> {
        let translated = self.fetch(text, source, target).await?;
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_and_joins_segments() {
        let payload = json!([
            [
                ["Hallo Welt. ", "Hello world. ", null, null, 10],
                ["Wie geht es dir?", "How are you?", null, null, 10]
            ],
            null,
            "en"
        ]);

        assert_eq!(
            extract_translation(&payload).unwrap(),
            "Hallo Welt. Wie geht es dir?"
        );
    }

    #[test]
    fn rejects_payload_without_segment_array() {
        let payload = json!({"error": "nope"});
        assert!(matches!(
            extract_translation(&payload),
            Err(TranslateError::UnexpectedPayload(_))
        ));
    }

    #[test]
    fn rejects_payload_with_empty_segments() {
        let payload = json!([[], null, "en"]);
        assert!(matches!(
            extract_translation(&payload),
            Err(TranslateError::UnexpectedPayload(_))
        ));
    }
}
