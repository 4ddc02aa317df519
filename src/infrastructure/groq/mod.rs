//! Adapter for an OpenAI-compatible chat completions API (Groq).

pub mod client;
pub mod error;
pub mod rate_limiter;
pub mod retry;

pub use client::GroqClient;
pub use error::LlmApiError;
