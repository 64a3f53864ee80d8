//! Serve command implementation.
//!
//! Wires the Gemini client and the typesetting driver into the HTTP
//! server and runs it until interrupted.

use std::sync::Arc;

use examforge_genai::{GeminiClient, GeminiConfig};
use examforge_server::{AppState, ServerConfig};
use examforge_typeset::{TypesetConfig, TypesetDriver};

use crate::colors;

pub async fn execute(host: &str, port: u16) -> anyhow::Result<()> {
    let provider = Arc::new(GeminiClient::new(GeminiConfig::from_env()?)?);

    let typeset = TypesetDriver::new(TypesetConfig::default());
    if !typeset.is_toolchain_available() {
        tracing::warn!(
            "pdflatex not found; /api/render will be unavailable, /api/export still works"
        );
    }

    let state = Arc::new(AppState { provider, typeset });

    println!(
        "\n{}Examforge Server{} - Question Paper Generation",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!(
        "{}  ◆ Server:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        host,
        port
    );
    println!(
        "{}  ◆ Endpoints:{} /api/upload, /api/render, /api/export",
        colors::CYAN,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    let config = ServerConfig {
        host: host.to_string(),
        port,
    };
    examforge_server::serve(state, config).await?;

    Ok(())
}
