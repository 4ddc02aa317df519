pub mod config;
pub mod session;

pub use config::{Config, LlmConfig, LoopConfig, RateLimitConfig, RetryConfig, TranslationConfig};
pub use session::{IterationRecord, RunOutcome, SessionState};
