//! Error taxonomy for the ingestion and generation pipeline.
//!
//! Each component surfaces a typed outcome; the umbrella [`ChatError`]
//! carries them to the caller boundary. Two things that look like errors
//! deliberately are not: empty-input validation and guardrail rejection
//! both resolve to fixed user-facing messages inside the orchestrator and
//! never reach this module.

use thiserror::Error;

/// Ingestion failure for a single file. Aborts that file only; sibling
/// files in a batch are unaffected.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to extract text from {file}: {reason}")]
    Extract { file: String, reason: String },

    #[error("embedding failed for {file}: {source}")]
    Embed {
        file: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("storage failed for {file}: {source}")]
    Store {
        file: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Retrieval failure: the index or the query embedding is unavailable.
/// No partial results are fabricated.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to embed query: {0}")]
    Embed(#[source] anyhow::Error),

    #[error("vector index unavailable: {0}")]
    Index(#[source] anyhow::Error),
}

/// Language-model call failure. Timeouts surface here through the HTTP
/// client's deadline; the system never substitutes a guessed answer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Model(#[source] anyhow::Error),

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Umbrella error returned by [`ChatService`](crate::service::ChatService)
/// operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
