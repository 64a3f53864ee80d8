//! Generate command implementation.
//!
//! Runs the upload pipeline locally: read source material, compile the
//! prompt, call Gemini, write the generated `.tex` next to the source.

use std::path::{Path, PathBuf};

use examforge_core::RawGenerationConfig;
use examforge_genai::{GeminiClient, GeminiConfig};
use examforge_server::{extract, pipeline};

use crate::colors;

pub struct GenerateArgs {
    pub source: String,
    pub output: Option<String>,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub question_types: Vec<String>,
    pub difficulty: Option<String>,
    pub instructions: Option<String>,
}

pub async fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.source);
    if !path.exists() {
        anyhow::bail!("Source not found: {}", args.source);
    }

    let bytes = std::fs::read(path)?;
    let filename = path.file_name().and_then(|name| name.to_str());
    let source_text = extract::extract_text(filename, &bytes)?;

    let config = RawGenerationConfig {
        subject: args.subject,
        level: args.level,
        question_types: (!args.question_types.is_empty()).then_some(args.question_types),
        difficulty: args.difficulty,
        custom_instructions: args.instructions,
        ..Default::default()
    };

    let client = GeminiClient::new(GeminiConfig::from_env()?)?;

    println!(
        "{}  ◆ Generating questions from:{} {}",
        colors::CYAN,
        colors::RESET,
        path.display()
    );

    let document = pipeline::generate_document(&client, config, &source_text).await?;

    let output_path = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| path.with_extension("tex"));
    std::fs::write(&output_path, &document)?;

    println!(
        "{}✓{} Wrote {} ({} bytes)",
        colors::GREEN,
        colors::RESET,
        output_path.display(),
        document.len()
    );

    Ok(())
}
