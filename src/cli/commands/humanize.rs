//! `humanize` command: run the full generate/scramble/judge loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::HumanizeLoop;
use crate::cli::commands::read_input;
use crate::cli::output;
use crate::domain::ports::ChatModel;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::groq::GroqClient;
use crate::infrastructure::translate::GoogleTranslateClient;
use crate::services::{Rewriter, Scorer, Scrambler};

#[derive(Debug, Args)]
pub struct HumanizeArgs {
    /// Text to humanize; reads stdin when neither TEXT nor --file is given
    pub text: Option<String>,

    /// Read the input text from a file instead
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn execute(args: HumanizeArgs, json: bool) -> Result<()> {
    let input = read_input(args.text, args.file)?;
    let config = ConfigLoader::load()?;

    let model: Arc<dyn ChatModel> = Arc::new(
        GroqClient::from_config(&config.llm).context("failed to build the chat client")?,
    );
    let translator = Arc::new(
        GoogleTranslateClient::from_config(&config.translation)
            .context("failed to build the translation client")?,
    );

    let rewriter = Rewriter::new(Arc::clone(&model), config.llm.max_tokens);
    let scrambler = Scrambler::new(translator, &config.translation);
    let scorer = Scorer::new(model);
    let pipeline = HumanizeLoop::new(rewriter, scrambler, scorer, config.loop_policy.clone());

    let outcome = if json {
        pipeline.run(&input).await?
    } else {
        let spinner = output::create_spinner("Humanizing...");
        let result = pipeline.run(&input).await;
        spinner.finish_and_clear();
        result?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        output::print_outcome(&input, &outcome);
        println!("\n{}", output::history_table(&outcome.history));
    }

    Ok(())
}
