//! Session state threaded through one humanizer run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mutable state for a single run of the humanizer loop.
///
/// Created fresh per invocation and owned by the loop controller for the
/// duration of the run; nothing persists across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Run identifier for log correlation
    pub run_id: Uuid,

    /// The user's input, baseline for length and feedback comparisons
    pub original_text: String,

    /// Working draft, overwritten by each rewrite/scramble step
    pub current_text: String,

    /// Number of completed rewrite passes
    pub iteration_count: u32,

    /// Adjusted score from the most recent judge pass.
    /// Initialized to the worst-case sentinel 1.0 and deliberately never
    /// clamped: additive penalties can push it past 1.0.
    pub current_score: f64,

    /// Diagnostic feedback from the most recent judge pass, consumed by the
    /// next rewrite and by the scrambler trigger
    pub feedback: String,

    /// One snapshot per completed judge pass, never truncated
    pub history: Vec<IterationRecord>,

    /// Run start time
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    /// Create fresh state for a new run over `original_text`.
    pub fn new(original_text: impl Into<String>) -> Self {
        let original_text = original_text.into();
        Self {
            run_id: Uuid::new_v4(),
            current_text: original_text.clone(),
            original_text,
            iteration_count: 0,
            current_score: 1.0,
            feedback: String::new(),
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Append a history snapshot for the current iteration.
    pub fn record_iteration(&mut self, score: f64) {
        self.history.push(IterationRecord {
            iteration: self.iteration_count,
            text: self.current_text.clone(),
            score,
            recorded_at: Utc::now(),
        });
    }
}

/// Snapshot of one completed judge pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration number (1-based: taken after the rewrite increment)
    pub iteration: u32,

    /// The draft as judged
    pub text: String,

    /// Adjusted score for the draft
    pub score: f64,

    /// When the judge pass completed
    pub recorded_at: DateTime<Utc>,
}

/// Terminal output of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Final draft
    pub final_text: String,

    /// Final adjusted score
    pub final_score: f64,

    /// Full iteration history, including non-terminal passes
    pub history: Vec<IterationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_starts_at_worst_case() {
        let state = SessionState::new("some input");

        assert_eq!(state.original_text, "some input");
        assert_eq!(state.current_text, "some input");
        assert_eq!(state.iteration_count, 0);
        assert!((state.current_score - 1.0).abs() < f64::EPSILON);
        assert!(state.feedback.is_empty());
        assert!(state.history.is_empty());
    }

    #[test]
    fn record_iteration_appends_snapshot() {
        let mut state = SessionState::new("input");
        state.iteration_count = 1;
        state.current_text = "draft one".to_string();

        state.record_iteration(0.42);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].iteration, 1);
        assert_eq!(state.history[0].text, "draft one");
        assert!((state.history[0].score - 0.42).abs() < f64::EPSILON);
    }
}
