use async_trait::async_trait;

/// Result type for chat model operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// A single completion request to a generative chat model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Optional system prompt that frames the conversation
    pub system: Option<String>,

    /// User message content
    pub user: String,

    /// Sampling temperature (0.0 deterministic .. ~1.0 creative)
    pub temperature: f64,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// Port trait for a generative chat-completion service.
///
/// The domain layer depends on this trait, not on a concrete HTTP client.
/// Adapters in the infrastructure layer implement it with a specific
/// provider; tests substitute in-memory fakes.
///
/// The service is non-deterministic by nature; callers must not assume
/// reproducibility. Implementations must be `Send + Sync` and take `&self`
/// so a single client handle can serve concurrent runs.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for the given request.
    ///
    /// # Errors
    /// Returns an error on transport failure, authentication failure, rate
    /// limit exhaustion after retries, or an empty/malformed completion.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}
