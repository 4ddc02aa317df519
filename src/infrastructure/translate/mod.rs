//! Adapter for the public Google translate endpoint.

pub mod client;

pub use client::{GoogleTranslateClient, TranslateError};
