//! Ghostwriter - Adversarial Text Humanizer
//!
//! Ghostwriter rewrites AI-generated text until it stops reading like AI. A
//! generator drafts a rewrite, a translation scrambler roughs up the phrasing,
//! and a judge scores the result; the loop repeats until the adjusted score
//! drops below the acceptance threshold or the retry ceiling is reached.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Session state, configuration, and ports
//! - **Application Layer** (`application`): The refinement loop
//! - **Service Layer** (`services`): Rewriter, scrambler, scorer, evaluator
//! - **Infrastructure Layer** (`infrastructure`): API adapters and config loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use ghostwriter::application::HumanizeLoop;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire the stage clients and run the loop
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::HumanizeLoop;
pub use domain::models::{
    Config, IterationRecord, LlmConfig, LoopConfig, RateLimitConfig, RetryConfig, RunOutcome,
    SessionState, TranslationConfig,
};
pub use domain::ports::{ChatModel, ChatRequest, Translator};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{evaluate, Evaluation, Rewriter, Scorer, Scrambler, Verdict};
