//! Storage abstraction for embedded chunks.
//!
//! The [`VectorStore`] trait defines the storage operations the retrieval
//! pipeline needs, enabling pluggable backends (SQLite, in-memory).
//! Implementations must be `Send + Sync` to work with async runtimes, and
//! every mutating call must be durable before it returns — callers never
//! issue a separate flush.
//!
//! Embedding happens above this trait: the application-level adapter embeds
//! chunk texts and hands this trait finished vectors.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Chunk, ScoredChunk};

/// Abstract storage backend for chunks and their embedding vectors.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`add`](VectorStore::add) | Insert chunks with their vectors |
/// | [`search`](VectorStore::search) | Top-k by descending cosine similarity |
/// | [`all_chunks`](VectorStore::all_chunks) | Full scan (no ordering guarantee) |
/// | [`delete_by_source`](VectorStore::delete_by_source) | Remove one source's chunks |
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their embedding vectors.
    ///
    /// `chunks` and `vectors` are parallel slices of equal length.
    async fn add(&self, chunks: &[Chunk], vectors: &[Vec<f32>]) -> Result<()>;

    /// Return up to `k` chunks ranked by descending cosine similarity to
    /// `query_vec`. An empty store yields an empty vec, not an error.
    async fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Full scan of every stored chunk. Callers re-sort as needed.
    async fn all_chunks(&self) -> Result<Vec<Chunk>>;

    /// Remove every chunk whose `meta.source` matches. Returns the number
    /// of chunks removed (0 for an unknown source).
    async fn delete_by_source(&self, source: &str) -> Result<u64>;
}
