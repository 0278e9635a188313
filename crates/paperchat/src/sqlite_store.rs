//! SQLite-backed [`VectorStore`] implementation.
//!
//! One table holds text, metadata, and the embedding blob per chunk.
//! Similarity search loads all embeddings and scores them in process,
//! which is fine at the corpus sizes this tool targets.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use paperchat_core::embedding::{blob_to_vec, cosine_similarity, vec_to_blob};
use paperchat_core::models::{Chunk, ChunkMeta, ScoredChunk};
use paperchat_core::store::VectorStore;

/// SQLite implementation of the [`VectorStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[allow(dead_code)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_chunk(row: &sqlx::sqlite::SqliteRow) -> Chunk {
    let chunk_order: Option<i64> = row.get("chunk_order");
    Chunk {
        text: row.get("text"),
        meta: ChunkMeta {
            source: row.get("source"),
            page: row.get::<i64, _>("page") as u32,
            paragraph: row.get::<i64, _>("paragraph") as u32,
            chunk_order: chunk_order.map(|o| o as u64),
        },
    }
}

#[async_trait]
impl VectorStore for SqliteStore {
    async fn add(&self, chunks: &[Chunk], vectors: &[Vec<f32>]) -> Result<()> {
        anyhow::ensure!(
            chunks.len() == vectors.len(),
            "chunk/vector count mismatch: {} vs {}",
            chunks.len(),
            vectors.len()
        );

        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        for (chunk, vector) in chunks.iter().zip(vectors.iter()) {
            let id = uuid::Uuid::new_v4().to_string();
            let blob = vec_to_blob(vector);
            sqlx::query(
                r#"
                INSERT INTO chunks (id, source, page, paragraph, chunk_order, text, embedding, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&chunk.meta.source)
            .bind(chunk.meta.page as i64)
            .bind(chunk.meta.paragraph as i64)
            .bind(chunk.meta.chunk_order.map(|o| o as i64))
            .bind(&chunk.text)
            .bind(&blob)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn search(&self, query_vec: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let rows = sqlx::query(
            "SELECT source, page, paragraph, chunk_order, text, embedding FROM chunks",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut hits: Vec<ScoredChunk> = rows
            .iter()
            .map(|row| {
                let blob: Vec<u8> = row.get("embedding");
                let vec = blob_to_vec(&blob);
                ScoredChunk {
                    chunk: row_to_chunk(row),
                    score: cosine_similarity(query_vec, &vec),
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    async fn all_chunks(&self) -> Result<Vec<Chunk>> {
        let rows = sqlx::query(
            "SELECT source, page, paragraph, chunk_order, text, embedding FROM chunks ORDER BY rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_chunk).collect())
    }

    async fn delete_by_source(&self, source: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chunks WHERE source = ?")
            .bind(source)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
