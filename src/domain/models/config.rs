use serde::{Deserialize, Serialize};

/// Main configuration structure for Ghostwriter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Generative model configuration (generator and judge share the client)
    #[serde(default)]
    pub llm: LlmConfig,

    /// Translation round-trip configuration
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Loop termination policy
    #[serde(default, rename = "loop")]
    pub loop_policy: LoopConfig,
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LlmConfig {
    /// API key. Falls back to the `GROQ_API_KEY` environment variable
    /// when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible chat completions API
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Completion token limit per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

const fn default_max_tokens() -> u32 {
    2048
}

const fn default_llm_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Sustained request rate (requests per second)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
}

const fn default_requests_per_second() -> f64 {
    2.0
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum retry attempts for transient errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Translation round-trip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TranslationConfig {
    /// Base URL of the translation endpoint
    #[serde(default = "default_translate_base_url")]
    pub base_url: String,

    /// Intermediate language codes for the round trip. The chain runs
    /// auto -> route[0] -> ... -> route[n-1] -> "en".
    #[serde(default = "default_route")]
    pub route: Vec<String>,

    /// Courtesy pause between chained hops, in milliseconds
    #[serde(default = "default_hop_delay_ms")]
    pub hop_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_translate_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_translate_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_route() -> Vec<String> {
    vec!["ja".to_string(), "de".to_string()]
}

const fn default_hop_delay_ms() -> u64 {
    500
}

const fn default_translate_timeout_secs() -> u64 {
    30
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_translate_base_url(),
            route: default_route(),
            hop_delay_ms: default_hop_delay_ms(),
            timeout_secs: default_translate_timeout_secs(),
        }
    }
}

/// Loop termination policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoopConfig {
    /// Hard retry ceiling: the loop never runs more than this many cycles
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Scores below this threshold terminate the loop early
    #[serde(default = "default_accept_threshold")]
    pub accept_threshold: f64,
}

const fn default_max_iterations() -> u32 {
    6
}

const fn default_accept_threshold() -> f64 {
    0.25
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            accept_threshold: default_accept_threshold(),
        }
    }
}
