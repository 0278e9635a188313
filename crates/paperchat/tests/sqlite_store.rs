//! Integration tests for the SQLite-backed vector store: persistence,
//! similarity ranking, and per-source deletion against a real database
//! file.

use tempfile::TempDir;

use paperchat::db::connect;
use paperchat::migrate::run_migrations;
use paperchat::store::VectorStore;
use paperchat::SqliteStore;
use paperchat_core::models::{Chunk, ChunkMeta};

async fn open_store(dir: &TempDir) -> SqliteStore {
    let path = dir.path().join("paperchat.db");
    let pool = connect(&path).await.unwrap();
    run_migrations(&pool).await.unwrap();
    SqliteStore::new(pool)
}

fn chunk(source: &str, page: u32, paragraph: u32, order: u64, text: &str) -> Chunk {
    Chunk {
        text: text.to_string(),
        meta: ChunkMeta {
            source: source.to_string(),
            page,
            paragraph,
            chunk_order: Some(order),
        },
    }
}

#[tokio::test]
async fn add_and_search_ranks_by_similarity() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store
        .add(
            &[
                chunk("a.pdf", 1, 1, 0, "north facing text"),
                chunk("a.pdf", 2, 1, 1, "east facing text"),
            ],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .await
        .unwrap();

    let hits = store.search(&[0.9, 0.1], 2).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk.text, "north facing text");
    assert!(hits[0].score > hits[1].score);
}

#[tokio::test]
async fn metadata_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    let original = chunk("report.pdf", 3, 2, 7, "quarterly revenue");
    store.add(&[original.clone()], &[vec![1.0, 0.0]]).await.unwrap();

    let all = store.all_chunks().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], original);
}

#[tokio::test]
async fn persists_across_reconnect() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir).await;
        store
            .add(&[chunk("a.pdf", 1, 1, 0, "durable")], &[vec![1.0]])
            .await
            .unwrap();
    }

    let store = open_store(&dir).await;
    let all = store.all_chunks().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].text, "durable");
}

#[tokio::test]
async fn delete_by_source_leaves_other_sources() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;

    store
        .add(
            &[
                chunk("a.pdf", 1, 1, 0, "first"),
                chunk("a.pdf", 2, 1, 1, "second"),
                chunk("b.pdf", 1, 1, 0, "third"),
            ],
            &[vec![1.0], vec![1.0], vec![1.0]],
        )
        .await
        .unwrap();

    let removed = store.delete_by_source("a.pdf").await.unwrap();
    assert_eq!(removed, 2);

    let all = store.all_chunks().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].meta.source, "b.pdf");
}

#[tokio::test]
async fn delete_unknown_source_is_zero() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    assert_eq!(store.delete_by_source("ghost.pdf").await.unwrap(), 0);
}

#[tokio::test]
async fn search_on_empty_database_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    assert!(store.search(&[1.0, 0.0], 4).await.unwrap().is_empty());
}

#[tokio::test]
async fn mismatched_batch_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let err = store
        .add(&[chunk("a.pdf", 1, 1, 0, "x")], &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("mismatch"));
}
