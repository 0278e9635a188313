//! # Paperchat Core
//!
//! Shared, runtime-agnostic logic for paperchat: data models, the page/
//! paragraph chunker, the representative-chunk summary selector, the
//! citation guardrail, and the vector store abstraction.
//!
//! This crate contains no tokio runtime, no sqlx, and no HTTP clients.
//! Everything external (embedding providers, language models, SQLite)
//! lives in the `paperchat` application crate and reaches this crate
//! through the [`store::VectorStore`] trait and plain data types.

pub mod chunk;
pub mod citation;
pub mod embedding;
pub mod models;
pub mod select;
pub mod store;
