//! # Paperchat CLI
//!
//! The `paperchat` binary drives the document-chat pipeline from the
//! command line: database initialization, PDF ingestion, question
//! answering, corpus summarization, text revision, and source management.
//!
//! ## Usage
//!
//! ```bash
//! paperchat --config ./config/paperchat.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `paperchat init` | Create the SQLite database and run schema migrations |
//! | `paperchat ingest <files..>` | Ingest PDF files (re-ingesting replaces) |
//! | `paperchat ask "<question>"` | Answer a question from the corpus, with sources |
//! | `paperchat summarize` | Summarize the whole corpus |
//! | `paperchat revise "<intent>"` | Generate workplace text from an intent |
//! | `paperchat sources` | List ingested sources and chunk counts |
//! | `paperchat delete <names..>` | Remove sources from the index |

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use paperchat::config::{load_config, Config};
use paperchat::db::connect;
use paperchat::embedding::create_embedder;
use paperchat::llm::create_client;
use paperchat::migrate::run_migrations;
use paperchat::{ChatOptions, ChatService, DocIndex, SqliteStore};

/// Paperchat — chat with your PDF documents, with page-cited answers.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/paperchat.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "paperchat",
    about = "Paperchat — a retrieval-augmented chat backend for PDF documents",
    version,
    long_about = "Paperchat ingests PDF files, chunks and embeds their text, and answers \
    questions strictly from the retrieved context. Every accepted answer carries an inline \
    page citation; answers the model cannot ground are refused."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/paperchat.toml`. Database, chunking,
    /// retrieval, embedding, and model settings are read from this file.
    #[arg(long, global = true, default_value = "./config/paperchat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the chunks table. Idempotent;
    /// running it multiple times is safe.
    Init,

    /// Ingest one or more PDF files.
    ///
    /// Each file is extracted per page, chunked on paragraph boundaries,
    /// embedded, and stored. Re-ingesting a file name replaces its
    /// previous chunks. A file that fails is reported and skipped; the
    /// rest of the batch proceeds.
    Ingest {
        /// PDF files to ingest.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Ask a question against the ingested corpus.
    Ask {
        /// The question to answer.
        question: String,

        /// Answer language (affects the citation marker form).
        #[arg(long, default_value = "English")]
        language: String,

        /// Answer tone/style.
        #[arg(long, default_value = "Neutral")]
        style: String,
    },

    /// Summarize the whole ingested corpus.
    Summarize {
        /// Summary language.
        #[arg(long, default_value = "English")]
        language: String,

        /// Summary tone/style.
        #[arg(long, default_value = "Neutral")]
        style: String,
    },

    /// Generate or revise workplace text from an intent.
    ///
    /// Retrieves template excerpts from the corpus when they are relevant
    /// to the intent. No citation guardrail applies to this flow.
    Revise {
        /// What the text should accomplish.
        intent: String,

        /// Output language.
        #[arg(long, default_value = "English")]
        language: String,

        /// Output tone/style.
        #[arg(long, default_value = "Formal")]
        style: String,
    },

    /// List ingested sources and their chunk counts.
    Sources,

    /// Remove sources from the index by file name.
    Delete {
        /// Source file names to remove.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = connect(&config.db.path).await?;
            run_migrations(&pool).await?;
            println!("Database initialized at {}", config.db.path.display());
        }
        Commands::Ingest { files } => {
            let service = build_service(&config).await?;
            let mut batch = Vec::with_capacity(files.len());
            for path in &files {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                let bytes = std::fs::read(path)?;
                batch.push((name, bytes));
            }
            let report = service.ingest_files(&batch).await;
            for (name, count) in &report.succeeded {
                println!("  ingested {} ({} chunks)", name, count);
            }
            for (name, reason) in &report.failed {
                println!("  failed   {}: {}", name, reason);
            }
            println!(
                "Done: {} succeeded, {} failed",
                report.succeeded.len(),
                report.failed.len()
            );
        }
        Commands::Ask {
            question,
            language,
            style,
        } => {
            let service = build_service(&config).await?;
            let answer = service.answer(&question, &language, &style).await?;
            println!("{}", answer.text);
            if !answer.sources.is_empty() {
                println!();
                println!("Sources:");
                for source in &answer.sources {
                    println!(
                        "  {} (page {}, paragraph {})",
                        source.source, source.page, source.paragraph
                    );
                }
            }
        }
        Commands::Summarize { language, style } => {
            let service = build_service(&config).await?;
            let summary = service.summarize(&language, &style).await?;
            println!("{}", summary);
        }
        Commands::Revise {
            intent,
            language,
            style,
        } => {
            let service = build_service(&config).await?;
            let text = service.revise(&intent, &language, &style, &[]).await?;
            println!("{}", text);
        }
        Commands::Sources => {
            let service = build_service(&config).await?;
            let sources = service.sources().await?;
            if sources.is_empty() {
                println!("No sources ingested.");
            } else {
                for (name, count) in sources {
                    println!("  {} ({} chunks)", name, count);
                }
            }
        }
        Commands::Delete { names } => {
            let service = build_service(&config).await?;
            let deleted = service.delete_sources(&names).await;
            println!("Deleted {}/{} sources", deleted, names.len());
        }
    }

    Ok(())
}

/// Wire the full pipeline from configuration. Migrations are idempotent,
/// so every command may run against a fresh database path.
async fn build_service(config: &Config) -> Result<ChatService> {
    let pool = connect(&config.db.path).await?;
    run_migrations(&pool).await?;

    let store = Arc::new(SqliteStore::new(pool));
    let embedder: Arc<dyn paperchat::embedding::Embedder> =
        Arc::from(create_embedder(&config.embedding)?);
    let index = Arc::new(DocIndex::new(store, embedder, config.retrieval.min_score));
    let llm = create_client(&config.llm)?;

    Ok(ChatService::new(
        index,
        llm,
        ChatOptions {
            top_k: config.retrieval.top_k,
            max_chars: config.chunking.max_chars,
            overlap_chars: config.chunking.overlap_chars,
        },
    ))
}
