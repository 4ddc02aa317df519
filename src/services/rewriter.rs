//! Generator stage: rewrites the draft against a fixed style policy.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::models::SessionState;
use crate::domain::ports::{ChatModel, ChatRequest};

/// Sampling temperature for the generator. High on purpose: the loop wants
/// surface variation between attempts.
const REWRITE_TEMPERATURE: f64 = 0.85;

/// Window (in characters) scanned for a label-like prefix in raw output
const PREFIX_SCAN_CHARS: usize = 20;

/// Minimum remainder length (in characters) for prefix stripping to apply
const PREFIX_MIN_REMAINDER_CHARS: usize = 50;

/// Fixed rewriting objective sent as the system instruction on every pass.
const STYLE_POLICY: &str = "\
Role: You are a ruthless Senior Academic Editor. Your goal is to rewrite the text to be **sophisticated yet deliberate in word choice**.
You must eliminate 'AI-sounding' patterns while maintaining a university-level academic register.

### I. THE CORE STRATEGY: DENSITY OVER VOLUME
1. **Nominalization (The Academic Secret):** Turn actions into nouns to *shorten* sentences.
   - *Bad (Wordy):* 'The participants were confused, which made them perform poorly.'
   - *Good (Dense):* 'Participant confusion resulted in suboptimal performance.'
2. **No Fluff/Flowery Language:** Do not use decorative adjectives ('wonderful', 'intricate', 'amazing'). If a word does not add meaning, delete it.

### II. TONE & MECHANICS
1. **Objective Authority:** Use third-person exclusively. No 'I', 'We', or 'You'.
2. **Epistemic Hedging:** Use 'suggests', 'indicates', 'may', or 'plausibly' instead of absolute claims. (e.g., 'This proves' -> 'This indicates').
3. **Latinate Vocabulary:** Use 'investigate' instead of 'check out'. Use 'constitutes' instead of 'makes up'.

### III. ANTI-ROBOT PROTOCOLS (Strict)
1. **Sentence Burstiness:** AI writes sentences of equal length. You must NOT.
   - Write one VERY short, direct sentence (<10 words). Follow it with a long, complex sentence (30+ words).
2. **The 'Banned' List:** NEVER use these words (they trigger AI detectors):
   - 'Delve', 'tapestry', 'landscape', 'symphony', 'leverage', 'underscore', 'multifaceted', 'testament', 'game-changer', 'crucial', 'vital', 'pivotal', 'interplay', 'meticulous', 'realm', 'foster'.
3. **Banned Transitions:** Do not start sentences with 'Moreover', 'Furthermore', 'In conclusion', or 'Additionally'. Use 'Conversely', 'Notably', 'Hence', or 'Thus'.

### IV. LENGTH CONSTRAINT
   - The output must be **roughly the same length** as the input. Do not expand, do not cut too much.
   - If you add complex words, remove simple ones to compensate.

### V. FORMATTING (CRITICAL)
   - **OUTPUT ONLY THE REWRITTEN TEXT.**
   - Do not include 'Here is the text:', 'Rewritten version:', or any explanations.
   - Do not use Markdown quotes (> text) or code blocks.";

/// Generator stage. Holds a handle to the generative service and assembles
/// the rewrite prompt from the session state.
pub struct Rewriter {
    model: Arc<dyn ChatModel>,
    max_tokens: u32,
}

impl Rewriter {
    pub fn new(model: Arc<dyn ChatModel>, max_tokens: u32) -> Self {
        Self { model, max_tokens }
    }

    /// Produce the next draft.
    ///
    /// The first pass (`iteration_count == 0`) rewrites the original text
    /// and ignores feedback; later passes rewrite the current draft under
    /// the judge's feedback. A failure of the generative service is not
    /// recovered here: a broken generator cannot safely produce output, so
    /// the error propagates and aborts the run.
    pub async fn rewrite(&self, state: &SessionState) -> Result<String> {
        let user = if state.iteration_count == 0 {
            format!(
                "Input Text:\n{}\n\n\
                 Task: Rewrite this text. Make it dense, academic, and human. \
                 STRICTLY ADHERE to the Banned Word list.",
                state.original_text
            )
        } else {
            format!(
                "### FEEDBACK FROM JUDGE:\n{}\n\n\
                 Current Draft:\n{}\n\n\
                 Task: Rewrite again. You failed the previous check.\n\
                 Focus specifically on the feedback above.\n\
                 If the feedback says 'Too Long', cut words aggressively while keeping the academic tone.",
                state.feedback, state.current_text
            )
        };

        let raw = self
            .model
            .complete(ChatRequest {
                system: Some(STYLE_POLICY.to_string()),
                user,
                temperature: REWRITE_TEMPERATURE,
                max_tokens: self.max_tokens,
            })
            .await
            .map_err(|err| anyhow::anyhow!(err))
            .with_context(|| format!("rewrite failed at iteration {}", state.iteration_count))?;

        debug!(
            iteration = state.iteration_count,
            chars = raw.chars().count(),
            "generator returned draft"
        );

        Ok(strip_label_prefix(&raw))
    }
}

/// Drop a leading label like "Rewritten text:" that models sometimes emit
/// despite the formatting rules.
///
/// The prefix is stripped only when a colon appears within the first 20
/// characters and more than 50 characters follow it; shorter remainders are
/// assumed to be legitimate text containing a colon.
fn strip_label_prefix(text: &str) -> String {
    let colon = text
        .char_indices()
        .take(PREFIX_SCAN_CHARS)
        .find(|&(_, c)| c == ':');

    if let Some((idx, _)) = colon {
        let remainder = &text[idx + 1..];
        if remainder.chars().count() > PREFIX_MIN_REMAINDER_CHARS {
            return remainder.trim().to_string();
        }
    }

    text.to_string()
}
