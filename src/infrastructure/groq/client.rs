use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::error::LlmApiError;
use super::rate_limiter::TokenBucketRateLimiter;
use super::retry::RetryPolicy;
use crate::domain::models::LlmConfig;
use crate::domain::ports::chat_model::{ChatModel, ChatRequest, Result as PortResult};

/// Environment variable consulted when the config carries no API key
const API_KEY_ENV: &str = "GROQ_API_KEY";

/// HTTP client for an OpenAI-compatible chat completions API.
///
/// Features:
/// - Connection pooling and reuse (via `reqwest::Client`)
/// - Token bucket rate limiting
/// - Exponential backoff retry for transient errors
/// - Typed error classification (transient vs permanent)
pub struct GroqClient {
    http_client: ReqwestClient,
    base_url: String,
    model: String,
    rate_limiter: TokenBucketRateLimiter,
    retry_policy: RetryPolicy,
}

impl GroqClient {
    /// Build a client from configuration.
    ///
    /// The API key comes from the config or, failing that, the
    /// `GROQ_API_KEY` environment variable.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmApiError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                LlmApiError::AuthenticationFailed(format!(
                    "no API key configured and {API_KEY_ENV} is unset"
                ))
            })?;

        // Never log the key itself; take chars, not bytes, so a multi-byte
        // key cannot split a code point
        let scrubbed = if api_key.chars().count() > 8 {
            let prefix: String = api_key.chars().take(8).collect();
            format!("{prefix}...[REDACTED]")
        } else {
            "[REDACTED]".to_string()
        };
        info!(
            base_url = %config.base_url,
            model = %config.model,
            api_key = %scrubbed,
            "initializing chat completions client"
        );

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| LlmApiError::InvalidRequest(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(LlmApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            rate_limiter: TokenBucketRateLimiter::new(config.rate_limit.requests_per_second),
            retry_policy: RetryPolicy::new(
                config.retry.max_retries,
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ),
        })
    }

    async fn execute_completion(&self, body: &CompletionBody<'_>) -> Result<String, LlmApiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {url}");

        let response = self.http_client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<String, LlmApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            return Err(LlmApiError::from_status(status, body));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmApiError::EmptyCompletion)
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    #[instrument(skip(self, request), fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn complete(&self, request: ChatRequest) -> PortResult<String> {
        self.rate_limiter.acquire().await;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system.as_deref() {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &request.user,
        });

        let body = CompletionBody {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let content = self
            .retry_policy
            .execute(|| self.execute_completion(&body))
            .await?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}
