pub mod humanize;
pub mod score;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Resolve the input text from a positional argument, a file, or stdin.
pub fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    let input = match (text, file) {
        (Some(_), Some(_)) => bail!("pass either TEXT or --file, not both"),
        (Some(text), None) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let input = input.trim().to_string();
    if input.is_empty() {
        bail!("input text is empty");
    }
    Ok(input)
}
