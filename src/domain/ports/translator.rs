use async_trait::async_trait;

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Port trait for a machine-translation service.
///
/// One call performs one hop. The scrambler chains several hops through
/// distinct language codes; implementations must therefore accept arbitrary
/// source/target tag pairs, including the pseudo-source `"auto"`.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// # Arguments
    /// * `source` - source language tag, or `"auto"` for detection
    /// * `target` - target language tag
    ///
    /// # Errors
    /// Returns an error on transport failure or an unparseable response.
    /// Callers that cannot tolerate failure must degrade on their side; the
    /// port itself is fallible.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}
