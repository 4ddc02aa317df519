//! Terminal presentation helpers.

use std::time::Duration;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::models::{IterationRecord, RunOutcome};

/// Spinner shown while the agents are working.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the original and humanized drafts with the final score.
pub fn print_outcome(original: &str, outcome: &RunOutcome) {
    println!("{}", style("Original").bold().underlined());
    println!("{original}\n");

    println!("{}", style("Humanized Result").bold().underlined().green());
    println!("{}\n", outcome.final_text);

    println!(
        "Final AI probability score: {}",
        style(format!("{:.2}", outcome.final_score)).bold()
    );
}

/// Render the iteration history as a table.
pub fn history_table(history: &[IterationRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Iteration", "Score", "Draft"]);

    for record in history {
        table.add_row(vec![
            Cell::new(record.iteration),
            Cell::new(format!("{:.2}", record.score)),
            Cell::new(truncate(&record.text, 120)),
        ]);
    }

    table
}

/// Truncate on a character boundary with an ellipsis marker.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_cuts_on_char_boundary() {
        let text = "ä".repeat(20);
        let cut = truncate(&text, 5);
        assert_eq!(cut.chars().count(), 6); // 5 chars + ellipsis
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn history_table_has_one_row_per_record() {
        use chrono::Utc;

        let history = vec![
            IterationRecord {
                iteration: 1,
                text: "draft one".to_string(),
                score: 0.8,
                recorded_at: Utc::now(),
            },
            IterationRecord {
                iteration: 2,
                text: "draft two".to_string(),
                score: 0.2,
                recorded_at: Utc::now(),
            },
        ];

        let table = history_table(&history);
        assert_eq!(table.row_iter().count(), 2);
    }
}
