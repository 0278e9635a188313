//! Vector store adapter: embedding + storage behind one surface.
//!
//! [`DocIndex`] owns an [`Embedder`] and a [`VectorStore`] and exposes the
//! operations the orchestrator needs: replace-by-source ingestion, top-k
//! retrieval, full scan, and per-source deletion. Mutations are
//! serialized behind a single async write lock so a concurrent ingest and
//! delete on the same source cannot interleave inconsistently.
//!
//! Ingestion embeds first and writes second: an embedding failure leaves
//! the store untouched, and a storage failure is reported for the whole
//! batch rather than silently succeeding for part of it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use paperchat_core::models::{Chunk, ScoredChunk};
use paperchat_core::store::VectorStore;

use crate::embedding::{embed_query, Embedder};
use crate::error::{IngestError, RetrievalError};

pub struct DocIndex {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    /// Relevance floor for retrieval; 0.0 disables it.
    min_score: f32,
    write_lock: Mutex<()>,
}

impl DocIndex {
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>, min_score: f32) -> Self {
        Self {
            store,
            embedder,
            min_score,
            write_lock: Mutex::new(()),
        }
    }

    /// Replace a source's chunks: embed the new batch, then delete-then-add
    /// under the write lock. Embedding failures leave the old data intact.
    pub async fn replace_source(
        &self,
        source: &str,
        chunks: Vec<Chunk>,
    ) -> Result<usize, IngestError> {
        let _guard = self.write_lock.lock().await;

        let vectors = if chunks.is_empty() {
            Vec::new()
        } else {
            self.embed_batch(&chunks, source).await?
        };

        self.store
            .delete_by_source(source)
            .await
            .map_err(|e| IngestError::Store {
                file: source.to_string(),
                source: e,
            })?;

        if chunks.is_empty() {
            return Ok(0);
        }
        self.store
            .add(&chunks, &vectors)
            .await
            .map_err(|e| IngestError::Store {
                file: source.to_string(),
                source: e,
            })?;
        Ok(chunks.len())
    }

    async fn embed_batch(&self, chunks: &[Chunk], file: &str) -> Result<Vec<Vec<f32>>, IngestError> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self
            .embedder
            .embed(&texts)
            .await
            .map_err(|e| IngestError::Embed {
                file: file.to_string(),
                source: e,
            })?;
        if vectors.len() != chunks.len() {
            return Err(IngestError::Embed {
                file: file.to_string(),
                source: anyhow::anyhow!(
                    "provider returned {} vectors for {} chunks",
                    vectors.len(),
                    chunks.len()
                ),
            });
        }
        Ok(vectors)
    }

    /// Top-k retrieval for a query. Empty results are not an error; chunks
    /// below the configured relevance floor are dropped.
    pub async fn retrieve_top_k(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, RetrievalError> {
        let query_vec = embed_query(self.embedder.as_ref(), query)
            .await
            .map_err(RetrievalError::Embed)?;
        let mut hits = self
            .store
            .search(&query_vec, k)
            .await
            .map_err(RetrievalError::Index)?;
        if self.min_score > 0.0 {
            hits.retain(|h| h.score >= self.min_score);
        }
        Ok(hits)
    }

    /// Full scan, used only for whole-corpus summarization.
    pub async fn retrieve_all(&self) -> Result<Vec<Chunk>, RetrievalError> {
        self.store.all_chunks().await.map_err(RetrievalError::Index)
    }

    /// Delete one source's chunks. Returns whether the operation completed
    /// without error; failures are logged, never raised, so sibling
    /// deletions in a batch proceed.
    pub async fn delete_by_source(&self, name: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        match self.store.delete_by_source(name).await {
            Ok(removed) => {
                info!(source = name, removed, "deleted source");
                true
            }
            Err(e) => {
                error!(source = name, error = %e, "failed to delete source");
                false
            }
        }
    }

    /// Delete several sources independently; returns how many completed.
    pub async fn delete_sources(&self, names: &[String]) -> usize {
        let mut deleted = 0;
        for name in names {
            if self.delete_by_source(name).await {
                deleted += 1;
            }
        }
        deleted
    }
}
