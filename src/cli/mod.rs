//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

pub use commands::humanize::HumanizeArgs;
pub use commands::score::ScoreArgs;

/// Adversarial humanizer: rewrites text until it stops reading like AI
#[derive(Debug, Parser)]
#[command(name = "ghostwriter", version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON instead of styled output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full generate/scramble/judge loop over the input text
    Humanize(HumanizeArgs),

    /// Judge the input text for AI-likeness without rewriting it
    Score(ScoreArgs),
}

/// Report a fatal error to the user and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
