//! Examforge CLI - exam paper generation from study material.

mod colors;
mod generate;
mod render;
mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "examforge")]
#[command(about = "Generate typeset exam papers from study material")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Generate a LaTeX question paper from a source text file
    Generate {
        /// Path to the source material (.txt, .md, or .tex)
        source: String,

        /// Output path for the generated .tex document
        #[arg(short, long)]
        output: Option<String>,

        /// Subject, e.g. physics
        #[arg(long)]
        subject: Option<String>,

        /// Class or level, e.g. undergraduate
        #[arg(long)]
        level: Option<String>,

        /// Question type to include (repeatable)
        #[arg(long = "question-type")]
        question_types: Vec<String>,

        /// Difficulty: easy, medium, hard, or mixed
        #[arg(long)]
        difficulty: Option<String>,

        /// Free-form instructions with highest priority during generation
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Compile a LaTeX question paper to PDF
    Render {
        /// Path to the .tex document
        document: String,

        /// Output path for the PDF
        #[arg(short, long)]
        output: Option<String>,

        /// Remove worked solutions before compiling
        #[arg(long)]
        no_solutions: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { host, port } => serve::execute(&host, port).await?,

        Commands::Generate {
            source,
            output,
            subject,
            level,
            question_types,
            difficulty,
            instructions,
        } => {
            generate::execute(generate::GenerateArgs {
                source,
                output,
                subject,
                level,
                question_types,
                difficulty,
                instructions,
            })
            .await?;
        }

        Commands::Render {
            document,
            output,
            no_solutions,
        } => render::execute(&document, output.as_deref(), !no_solutions).await?,
    }

    Ok(())
}
