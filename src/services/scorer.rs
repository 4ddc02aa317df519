//! Judge stage: estimates how machine-generated a text reads.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::ports::{ChatModel, ChatRequest};

/// The judge must be stable between passes, so no sampling noise
const JUDGE_TEMPERATURE: f64 = 0.0;

/// Token limit for the verdict; the payload is one small JSON object
const JUDGE_MAX_TOKENS: u32 = 512;

/// Neutral score returned when the judge is unreachable or unparseable
const FALLBACK_SCORE: f64 = 0.5;

/// Fixed evaluation rubric sent as the judge's system prompt.
const JUDGE_RUBRIC: &str = "\
You are a Forensic Linguist specializing in AI detection. \
Your task is to analyze the following text and determine if it was written by an AI (like ChatGPT/Llama) or a Human.

INDICATORS OF AI TEXT:
1. Structure: Perfectly balanced paragraphs, predictable sentence length.
2. Vocabulary: Overuse of 'crucial', 'foster', 'tapestry', 'delve', 'leverage', 'landscape'.
3. Tone: Overly neutral, lack of strong opinion, generic 'preaching'.
4. Fluff: Sentences that sound nice but say little.

INDICATORS OF HUMAN TEXT:
1. Imperfection: Sentence fragments, slight awkwardness, varied rhythm.
2. Specificity: Concrete examples, strong opinions, colloquialisms.

OUTPUT FORMAT: Return ONLY a raw JSON object (no markdown) with two keys:
- 'score': A float between 0.0 (Human) and 1.0 (AI).
- 'reason': A short, biting explanation of why.";

/// The judge's structured verdict. Both fields are required: a response
/// missing either one is a parse failure and collapses to the neutral
/// fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    /// AI-likeness estimate in [0, 1]
    pub score: f64,

    /// Short diagnostic explanation
    pub reason: String,
}

/// Judge stage. Delegates to the generative service with a fixed rubric and
/// parses the structured verdict.
pub struct Scorer {
    model: Arc<dyn ChatModel>,
}

impl Scorer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Score `text` for AI-likeness.
    ///
    /// Fail-soft by design: an unreachable judge must not halt the creative
    /// loop, so any transport or parse failure is logged and collapsed into
    /// a neutral `(0.5, "")` verdict instead of an error.
    pub async fn score(&self, text: &str) -> Verdict {
        let request = ChatRequest {
            system: Some(JUDGE_RUBRIC.to_string()),
            user: format!("TEXT TO ANALYZE:\n{text}"),
            temperature: JUDGE_TEMPERATURE,
            max_tokens: JUDGE_MAX_TOKENS,
        };

        let content = match self.model.complete(request).await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "judge call failed, using neutral fallback score");
                return Verdict::neutral();
            }
        };

        match parse_verdict(&content) {
            Ok(verdict) => {
                debug!(score = verdict.score, reason = %verdict.reason, "judge verdict");
                verdict
            }
            Err(err) => {
                warn!(error = %err, "judge verdict unparseable, using neutral fallback score");
                Verdict::neutral()
            }
        }
    }
}

impl Verdict {
    fn neutral() -> Self {
        Self {
            score: FALLBACK_SCORE,
            reason: String::new(),
        }
    }
}

/// Parse the judge's response, tolerating a wrapping code fence.
fn parse_verdict(content: &str) -> Result<Verdict, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}

/// Strip an optional triple-backtick fence (with an optional `json` tag)
/// around the payload. Models occasionally ignore the "no markdown" rule.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    enum Reply {
        Content(String),
        Failure,
    }

    struct CannedModel {
        reply: Reply,
    }

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(
            &self,
            _request: ChatRequest,
        ) -> crate::domain::ports::chat_model::Result<String> {
            match &self.reply {
                Reply::Content(content) => Ok(content.clone()),
                Reply::Failure => Err("service unavailable".into()),
            }
        }
    }

    fn scorer_with(reply: Reply) -> Scorer {
        Scorer::new(Arc::new(CannedModel { reply }))
    }

    #[tokio::test]
    async fn parses_plain_json_verdict() {
        let scorer = scorer_with(Reply::Content(
            r#"{"score": 0.82, "reason": "Perfectly balanced paragraphs."}"#.to_string(),
        ));

        let verdict = scorer.score("some text").await;
        assert!((verdict.score - 0.82).abs() < f64::EPSILON);
        assert_eq!(verdict.reason, "Perfectly balanced paragraphs.");
    }

    #[tokio::test]
    async fn parses_fenced_json_verdict() {
        let scorer = scorer_with(Reply::Content(
            "```json\n{\"score\": 0.3, \"reason\": \"fine\"}\n```".to_string(),
        ));

        let verdict = scorer.score("some text").await;
        assert!((verdict.score - 0.3).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn transport_failure_yields_neutral_verdict() {
        let scorer = scorer_with(Reply::Failure);

        let verdict = scorer.score("some text").await;
        assert!((verdict.score - 0.5).abs() < f64::EPSILON);
        assert!(verdict.reason.is_empty());
    }

    #[tokio::test]
    async fn verdict_missing_reason_yields_neutral_verdict() {
        let scorer = scorer_with(Reply::Content(r#"{"score": 0.9}"#.to_string()));

        let verdict = scorer.score("some text").await;
        assert!((verdict.score - 0.5).abs() < f64::EPSILON);
        assert!(verdict.reason.is_empty());
    }

    #[tokio::test]
    async fn unparseable_content_yields_neutral_verdict() {
        let scorer = scorer_with(Reply::Content("I think it's probably AI.".to_string()));

        let verdict = scorer.score("some text").await;
        assert!((verdict.score - 0.5).abs() < f64::EPSILON);
        assert!(verdict.reason.is_empty());
    }

    #[test]
    fn strip_code_fence_handles_untagged_fence() {
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strip_code_fence_leaves_plain_content_alone() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }
}
