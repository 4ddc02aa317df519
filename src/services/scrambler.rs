//! Humanizer stage: semantic round-trip through intermediate languages.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::models::TranslationConfig;
use crate::domain::ports::Translator;

/// Feedback phrase that re-arms the scrambler after the first iteration
const TRIGGER_PHRASE: &str = "reads like ai";

/// Language code the round trip ends on
const HOME_LANGUAGE: &str = "en";

/// Humanizer stage. Perturbs surface phrasing by translating the draft
/// through a chain of intermediate languages and back, while approximately
/// preserving meaning.
pub struct Scrambler {
    translator: Arc<dyn Translator>,
    route: Vec<String>,
    hop_delay: Duration,
}

impl Scrambler {
    pub fn new(translator: Arc<dyn Translator>, config: &TranslationConfig) -> Self {
        Self {
            translator,
            route: config.route.clone(),
            hop_delay: Duration::from_millis(config.hop_delay_ms),
        }
    }

    /// Whether the round trip should run for this cycle.
    ///
    /// Runs immediately after the very first rewrite, or whenever the judge
    /// still flags the draft as machine-sounding. Otherwise the generator's
    /// latest grammar fixes are preserved untouched.
    pub fn should_scramble(iteration: u32, feedback: &str) -> bool {
        iteration == 1 || feedback.to_lowercase().contains(TRIGGER_PHRASE)
    }

    /// Run the round trip if triggered; otherwise return `text` unchanged.
    ///
    /// Fail-open: any hop failure logs a warning and yields the input text
    /// exactly as received. The scrambler never aborts the loop.
    pub async fn scramble(&self, text: &str, iteration: u32, feedback: &str) -> String {
        if !Self::should_scramble(iteration, feedback) {
            debug!(iteration, "scrambler skipped, preserving generator output");
            return text.to_string();
        }

        info!(iteration, route = ?self.route, "running semantic round-trip");

        match self.round_trip(text).await {
            Ok(scrambled) => scrambled,
            Err(err) => {
                warn!(error = %err, "round-trip failed, passing draft through unchanged");
                text.to_string()
            }
        }
    }

    async fn round_trip(
        &self,
        text: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut targets: Vec<&str> = self.route.iter().map(String::as_str).collect();
        targets.push(HOME_LANGUAGE);

        let mut current = text.to_string();
        let mut source = "auto";

        for target in targets {
            current = self.translator.translate(&current, source, target).await?;
            source = target;

            // Courtesy pause between hops against an unauthenticated endpoint
            if target != HOME_LANGUAGE {
                sleep(self.hop_delay).await;
            }
        }

        Ok(current)
    }
}
