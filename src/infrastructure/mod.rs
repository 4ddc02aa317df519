//! Infrastructure layer: external-service adapters and configuration.

pub mod config;
pub mod groq;
pub mod translate;
