//! `score` command: one-shot judge pass without rewriting.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::cli::commands::read_input;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::groq::GroqClient;
use crate::services::Scorer;

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Text to judge; reads stdin when neither TEXT nor --file is given
    pub text: Option<String>,

    /// Read the input text from a file instead
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn execute(args: ScoreArgs, json: bool) -> Result<()> {
    let input = read_input(args.text, args.file)?;
    let config = ConfigLoader::load()?;

    let model =
        Arc::new(GroqClient::from_config(&config.llm).context("failed to build the chat client")?);
    let scorer = Scorer::new(model);

    let verdict = scorer.score(&input).await;

    if json {
        let payload = serde_json::json!({
            "score": verdict.score,
            "reason": verdict.reason,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "AI probability score: {}",
            style(format!("{:.2}", verdict.score)).bold()
        );
        if !verdict.reason.is_empty() {
            println!("Reason: {}", verdict.reason);
        }
    }

    Ok(())
}
