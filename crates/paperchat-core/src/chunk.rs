//! Page/paragraph chunker with stable positional metadata.
//!
//! Splits per-page text into size-bounded chunks while recording where each
//! chunk came from: page, paragraph, and a per-document emission counter
//! (`chunk_order`). The counter is the sole reliable total order across
//! pages and paragraphs within one source.
//!
//! # Algorithm
//!
//! 1. Pages are processed in original order. Empty or whitespace-only pages
//!    produce no chunks and increment no counter.
//! 2. Each page is split into paragraphs at blank-line boundaries (a line
//!    that is empty after trimming separates paragraphs). A page with no
//!    blank lines is one paragraph.
//! 3. Each paragraph is independently split into chunks of at most
//!    `max_chars` characters with a sliding window: `overlap_chars`
//!    characters are duplicated between consecutive chunks of the same
//!    paragraph, never across paragraph boundaries.
//! 4. `chunk_order` is a single counter shared across the whole document,
//!    incremented once per emitted chunk in emission order.
//!
//! Splitting is character-based (Unicode scalar values), so a chunk never
//! ends inside a multi-byte code point.
//!
//! # Example
//!
//! ```rust
//! use paperchat_core::chunk::chunk_pages;
//!
//! let pages = vec!["Intro paragraph.\n\nBody paragraph.".to_string()];
//! let chunks = chunk_pages(&pages, "report.pdf", 800, 100);
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].meta.paragraph, 2);
//! assert_eq!(chunks[1].meta.chunk_order, Some(1));
//! ```

use crate::models::{Chunk, ChunkMeta};

/// Split per-page text into chunks with page/paragraph/order metadata.
///
/// `pages` must be in original document order; `source` is the filename
/// stamped into every chunk's metadata.
///
/// # Guarantees
///
/// - Chunks are emitted page-major, then paragraph, then split order.
/// - `chunk_order` values are unique and strictly increasing across the
///   returned sequence, starting at 0.
/// - Concatenating a paragraph's chunks minus the overlapped prefixes
///   reconstructs the paragraph text exactly.
pub fn chunk_pages(
    pages: &[String],
    source: &str,
    max_chars: usize,
    overlap_chars: usize,
) -> Vec<Chunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut order: u64 = 0;

    for (page_idx, page_text) in pages.iter().enumerate() {
        if page_text.trim().is_empty() {
            continue;
        }
        for (para_idx, paragraph) in split_paragraphs(page_text).into_iter().enumerate() {
            for piece in split_paragraph(&paragraph, max_chars, overlap_chars) {
                chunks.push(Chunk {
                    text: piece,
                    meta: ChunkMeta {
                        source: source.to_string(),
                        page: page_idx as u32 + 1,
                        paragraph: para_idx as u32 + 1,
                        chunk_order: Some(order),
                    },
                });
                order += 1;
            }
        }
    }

    chunks
}

/// Split page text into non-empty paragraphs at blank-line boundaries.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                paragraphs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    paragraphs
}

/// Split one paragraph into windows of at most `max_chars` characters,
/// duplicating `overlap_chars` characters between consecutive windows.
fn split_paragraph(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return vec![text.to_string()];
    }

    // The window must advance by at least one character per step.
    let overlap = overlap_chars.min(max_chars - 1);
    let mut pieces = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + max_chars).min(chars.len());
        pieces.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start = end - overlap;
    }

    pieces
}
