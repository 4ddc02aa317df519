//! Deterministic structural checks layered over the judge's verdict.

/// Raw scores above this read as machine-generated
const AI_FLAG_THRESHOLD: f64 = 0.30;

/// Drafts longer than original * this ratio are too verbose
const VERBOSE_RATIO: f64 = 1.10;

/// Drafts shorter than original * this ratio are too short
const SHORT_RATIO: f64 = 0.85;

/// Penalties only apply while the running score is still below this bound
const PENALTY_CEILING: f64 = 0.5;

/// Penalty for a length violation in either direction
const LENGTH_PENALTY: f64 = 0.10;

/// Penalty for banned-word usage
const BANNED_WORD_PENALTY: f64 = 0.20;

/// Detector-trigger words the generator is told to avoid, scanned in order
const BANNED_WORDS: [&str; 8] = [
    "delve",
    "tapestry",
    "leverage",
    "underscore",
    "crucial",
    "meticulous",
    "realm",
    "interplay",
];

/// Literal phrases that betray a sloppy translation round-trip
const TRANSLATION_ARTIFACTS: [&str; 2] = [" picture calculation ", " logic box "];

/// Outcome of one evaluator pass: the adjusted score plus synthesized
/// feedback for the next rewrite.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Judge score after structural penalties. Deliberately not clamped to
    /// [0, 1]: downstream only compares against fixed thresholds, and the
    /// overshoot is observable behavior worth preserving.
    pub score: f64,

    /// Space-joined feedback clauses in rule order, or "Good."
    pub feedback: String,
}

/// Apply the structural rule set to a draft.
///
/// Rules run in a fixed order and mutate a running score, so later rules see
/// earlier penalties when deciding whether their own penalty still applies.
pub fn evaluate(current_text: &str, original_text: &str, ai_score: f64) -> Evaluation {
    let mut score = ai_score;
    let mut clauses: Vec<String> = Vec::new();

    if score > AI_FLAG_THRESHOLD {
        clauses.push("Text still reads like AI. Vary your sentence structure more.".to_string());
    }

    let orig_len = original_text.split_whitespace().count();
    let new_len = current_text.split_whitespace().count();

    #[allow(clippy::cast_precision_loss)]
    let (orig_words, new_words) = (orig_len as f64, new_len as f64);

    if new_words > orig_words * VERBOSE_RATIO {
        clauses.push(format!(
            "Text is too verbose ({new_len} words vs {orig_len} orig). Use 'Nominalization'."
        ));
        if score < PENALTY_CEILING {
            score += LENGTH_PENALTY;
        }
    }

    if new_words < orig_words * SHORT_RATIO {
        clauses.push(format!(
            "Text is too short ({new_len} words vs {orig_len} orig). Use 'Expansion'."
        ));
        if score < PENALTY_CEILING {
            score += LENGTH_PENALTY;
        }
    }

    let lower_text = current_text.to_lowercase();
    let banned_hits: Vec<&str> = BANNED_WORDS
        .iter()
        .copied()
        .filter(|word| lower_text.contains(word))
        .collect();

    if !banned_hits.is_empty() {
        clauses.push(format!(
            "You used banned AI words ({}). Remove them.",
            banned_hits.join(", ")
        ));
        if score < PENALTY_CEILING {
            score += BANNED_WORD_PENALTY;
        }
    }

    if TRANSLATION_ARTIFACTS
        .iter()
        .any(|artifact| current_text.contains(artifact))
    {
        clauses.push("Translation artifacts detected. Fix awkward phrasing.".to_string());
    }

    let feedback = if clauses.is_empty() {
        "Good.".to_string()
    } else {
        clauses.join(" ")
    };

    Evaluation { score, feedback }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn assert_score(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected score {expected}, got {actual}"
        );
    }

    #[test]
    fn clean_draft_is_good() {
        let original = words(100);
        let eval = evaluate(&original, &original, 0.10);

        assert_score(eval.score, 0.10);
        assert_eq!(eval.feedback, "Good.");
    }

    #[test]
    fn high_ai_score_flags_sentence_structure() {
        let original = words(100);
        let eval = evaluate(&original, &original, 0.80);

        assert_score(eval.score, 0.80);
        assert_eq!(
            eval.feedback,
            "Text still reads like AI. Vary your sentence structure more."
        );
    }

    #[test]
    fn verbose_draft_is_penalized_below_ceiling() {
        let eval = evaluate(&words(120), &words(100), 0.20);

        assert_score(eval.score, 0.30);
        assert_eq!(
            eval.feedback,
            "Text is too verbose (120 words vs 100 orig). Use 'Nominalization'."
        );
    }

    #[test]
    fn verbose_draft_is_not_penalized_above_ceiling() {
        let eval = evaluate(&words(120), &words(100), 0.60);
        assert_score(eval.score, 0.60);
    }

    #[test]
    fn short_draft_is_penalized() {
        let eval = evaluate(&words(80), &words(100), 0.20);

        assert_score(eval.score, 0.30);
        assert_eq!(
            eval.feedback,
            "Text is too short (80 words vs 100 orig). Use 'Expansion'."
        );
    }

    #[test]
    fn boundary_lengths_do_not_flag() {
        // Exactly 110% and exactly 85% sit on the open boundaries.
        assert_eq!(evaluate(&words(110), &words(100), 0.10).feedback, "Good.");
        assert_eq!(evaluate(&words(85), &words(100), 0.10).feedback, "Good.");
    }

    #[test]
    fn banned_words_are_named_in_list_order() {
        let original = words(10);
        let text = "the realm we delve into word word word word word word";
        let eval = evaluate(text, &original, 0.20);

        assert_score(eval.score, 0.40);
        assert_eq!(
            eval.feedback,
            "You used banned AI words (delve, realm). Remove them."
        );
    }

    #[test]
    fn banned_word_match_is_case_insensitive() {
        let original = words(10);
        let text = "Crucial insight word word word word word word word word";
        let eval = evaluate(text, &original, 0.20);

        assert!(eval.feedback.contains("banned AI words (crucial)"));
    }

    #[test]
    fn translation_artifacts_flag_without_penalty() {
        let original = words(10);
        let text = "word word picture calculation word word word word word word";
        let eval = evaluate(text, &original, 0.20);

        assert_score(eval.score, 0.20);
        assert_eq!(
            eval.feedback,
            "Translation artifacts detected. Fix awkward phrasing."
        );
    }

    #[test]
    fn penalties_accumulate_without_clamping() {
        // ai 0.2, 120% length, one banned word: 0.2 + 0.1 + 0.2 = 0.5,
        // with the verbosity clause ahead of the banned-word clause.
        let mut text = words(119);
        text.push_str(" tapestry");
        let eval = evaluate(&text, &words(100), 0.20);

        assert_score(eval.score, 0.50);
        let verbose_at = eval.feedback.find("too verbose").unwrap();
        let banned_at = eval.feedback.find("banned AI words").unwrap();
        assert!(verbose_at < banned_at);
    }

    #[test]
    fn running_score_gates_later_penalties() {
        // 0.45 + 0.1 (verbose) = 0.55, so the banned-word penalty no longer
        // applies even though 0.45 started below the ceiling.
        let mut text = words(119);
        text.push_str(" tapestry");
        let eval = evaluate(&text, &words(100), 0.45);

        assert_score(eval.score, 0.55);
        assert!(eval.feedback.contains("banned AI words"));
    }

    #[test]
    fn raw_judge_score_passes_through_unclamped() {
        let original = words(100);
        let eval = evaluate(&original, &original, 0.95);
        assert_score(eval.score, 0.95);
    }
}
