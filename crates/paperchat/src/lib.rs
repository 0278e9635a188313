//! # Paperchat
//!
//! **A retrieval-augmented chat backend for PDF documents.**
//!
//! Paperchat ingests PDF files, chunks their text on paragraph boundaries,
//! embeds the chunks, and answers questions strictly from the retrieved
//! context, with a citation guardrail that refuses any answer lacking an
//! inline page reference.
//!
//! ## Data Flow
//!
//! 1. **Extraction** ([`extract`]) turns a PDF into per-page text.
//! 2. The **chunker** (`paperchat_core::chunk`) splits pages into
//!    paragraph-aligned, overlap-windowed chunks with provenance metadata.
//! 3. Chunks are embedded via the **embedding provider** ([`embedding`])
//!    and stored in SQLite ([`sqlite_store`]) behind the
//!    [`DocIndex`](index::DocIndex) adapter.
//! 4. The **orchestrator** ([`service`]) retrieves top-k chunks for a
//!    question, prompts the model ([`llm`]), and enforces the citation
//!    guardrail (`paperchat_core::citation`) before returning an answer
//!    with its sources.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`migrate`] | Database schema migrations (idempotent) |
//! | [`extract`] | Per-page PDF text extraction |
//! | [`embedding`] | Embedding provider trait, OpenAI and Ollama backends |
//! | [`llm`] | Chat-completion client trait, OpenAI and Ollama backends |
//! | [`sqlite_store`] | SQLite implementation of the vector store |
//! | [`index`] | Embedding + storage adapter with serialized mutations |
//! | [`prompts`] | QA, summarization, and revision prompt templates |
//! | [`service`] | Orchestrator: answer, summarize, revise, ingest |
//! | [`error`] | Typed pipeline errors |
//!
//! Pure, IO-free logic (chunking, chunk selection, citation detection,
//! vector math, the in-memory store) lives in the `paperchat-core` crate.

pub mod config;
pub mod db;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod llm;
pub mod migrate;
pub mod prompts;
pub mod service;
pub mod sqlite_store;

pub use error::{ChatError, GenerationError, IngestError, RetrievalError};
pub use index::DocIndex;
pub use paperchat_core::store;
pub use service::{Answer, ChatOptions, ChatService, IngestReport};
pub use sqlite_store::SqliteStore;
