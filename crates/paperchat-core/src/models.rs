//! Core data models used throughout paperchat.
//!
//! These types represent the chunks, retrieval results, and conversation
//! turns that flow through the ingestion and generation pipeline.

use serde::{Deserialize, Serialize};

/// Positional metadata attached to every stored chunk.
///
/// `source` is the originating filename and the partition key for deletion
/// and summarization grouping; a chunk never exists without one. `page` and
/// `paragraph` are 1-based and reflect the chunk's origin position in the
/// document; they are never renumbered after storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMeta {
    /// Originating filename (non-empty).
    pub source: String,
    /// 1-based page number within the source document.
    pub page: u32,
    /// 1-based paragraph number within the page.
    pub paragraph: u32,
    /// Strictly increasing emission counter, assigned per document during
    /// one ingestion pass. `None` only on rows stored before the field
    /// existed; the summary selector falls back to `(page, paragraph)`
    /// ordering for those.
    pub chunk_order: Option<u64>,
}

/// A bounded-size unit of document text with positional metadata — the
/// atomic unit of storage and retrieval. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub meta: ChunkMeta,
}

/// A chunk plus its relevance score, returned by a retrieval call.
///
/// Transient: exists only for the duration of one retrieval.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Cosine similarity to the query, in `[-1.0, 1.0]`.
    pub score: f32,
}

/// A citation row returned to callers alongside a generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub page: u32,
    pub source: String,
    pub paragraph: u32,
}

/// Speaker role in a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of caller-supplied conversation history.
///
/// Used only to recover the most recent assistant turn as "previous
/// version" context for revision generation; never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Returns the content of the most recent assistant turn, if any.
pub fn last_assistant_turn(history: &[ConversationTurn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == Role::Assistant)
        .map(|turn| turn.content.as_str())
}
