//! In-memory [`VectorStore`] implementation for tests.
//!
//! Chunks and vectors live in a `Vec` behind `std::sync::RwLock`; search is
//! brute-force cosine similarity over everything stored.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::embedding::cosine_similarity;
use crate::models::{Chunk, ScoredChunk};

use super::VectorStore;

/// In-memory store backing unit and integration tests.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<(Chunk, Vec<f32>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn add(&self, chunks: &[Chunk], vectors: &[Vec<f32>]) -> Result<()> {
        anyhow::ensure!(
            chunks.len() == vectors.len(),
            "chunk/vector count mismatch: {} vs {}",
            chunks.len(),
            vectors.len()
        );
        let mut rows = self.rows.write().unwrap();
        for (chunk, vector) in chunks.iter().zip(vectors.iter()) {
            rows.push((chunk.clone(), vector.clone()));
        }
        Ok(())
    }

    async fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let rows = self.rows.read().unwrap();
        let mut scored: Vec<ScoredChunk> = rows
            .iter()
            .map(|(chunk, vector)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query_vec, vector),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    async fn all_chunks(&self) -> Result<Vec<Chunk>> {
        let rows = self.rows.read().unwrap();
        Ok(rows.iter().map(|(chunk, _)| chunk.clone()).collect())
    }

    async fn delete_by_source(&self, source: &str) -> Result<u64> {
        let mut rows = self.rows.write().unwrap();
        let before = rows.len();
        rows.retain(|(chunk, _)| chunk.meta.source != source);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChunkMeta;

    fn chunk(source: &str, order: u64, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            meta: ChunkMeta {
                source: source.to_string(),
                page: 1,
                paragraph: 1,
                chunk_order: Some(order),
            },
        }
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let store = MemoryStore::new();
        store
            .add(
                &[chunk("a.pdf", 0, "north"), chunk("a.pdf", 1, "east")],
                &[vec![1.0, 0.0], vec![0.0, 1.0]],
            )
            .await
            .unwrap();

        let hits = store.search(&[0.9, 0.1], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.text, "north");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn empty_store_returns_empty_results() {
        let store = MemoryStore::new();
        assert!(store.search(&[1.0, 0.0], 4).await.unwrap().is_empty());
        assert!(store.all_chunks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_matching_source() {
        let store = MemoryStore::new();
        store
            .add(
                &[
                    chunk("a.pdf", 0, "keep me out"),
                    chunk("b.pdf", 0, "keep me in"),
                ],
                &[vec![1.0], vec![1.0]],
            )
            .await
            .unwrap();

        let removed = store.delete_by_source("a.pdf").await.unwrap();
        assert_eq!(removed, 1);
        let remaining = store.all_chunks().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].meta.source, "b.pdf");
    }

    #[tokio::test]
    async fn delete_unknown_source_is_zero_not_error() {
        let store = MemoryStore::new();
        assert_eq!(store.delete_by_source("ghost.pdf").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mismatched_batch_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .add(&[chunk("a.pdf", 0, "x")], &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }
}
