pub mod chat_model;
pub mod translator;

pub use chat_model::{ChatModel, ChatRequest};
pub use translator::Translator;
