//! Representative-chunk selection for multi-document summarization.
//!
//! Whole-corpus summarization must not grow prompt size with document
//! length, so instead of summarizing every chunk we take a bounded
//! structural sample per source: the first few chunks (intro), a pair
//! around the middle (body), and the last couple (conclusion).
//!
//! Ordering within a source prefers `chunk_order` — the emission counter
//! assigned at ingest time. Rows stored before that field existed fall
//! back to `(page, paragraph, insertion index)`.

use std::collections::HashMap;

use crate::models::Chunk;

/// Chunks taken from the start of each source.
pub const FIRST_CHUNKS: usize = 3;
/// Chunks taken around the middle of each source.
pub const MIDDLE_CHUNKS: usize = 2;
/// Chunks taken from the end of each source.
pub const LAST_CHUNKS: usize = 2;
/// Hard cap on selected chunks per source.
pub const MAX_PER_SOURCE: usize = 8;

/// Return the ordered, de-duplicated indices to sample from a group of
/// `count` chunks: first/middle/last slices, ascending, capped at
/// [`MAX_PER_SOURCE`].
pub fn pick_chunk_indices(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<usize> = (0..FIRST_CHUNKS.min(count)).collect();

    let center = count / 2;
    if MIDDLE_CHUNKS >= 2 && count >= 2 {
        candidates.push(center.saturating_sub(1));
        candidates.push(center);
    } else {
        candidates.push(center);
    }

    candidates.extend(count.saturating_sub(LAST_CHUNKS)..count);

    candidates.retain(|&i| i < count);
    candidates.sort_unstable();
    candidates.dedup();
    candidates.truncate(MAX_PER_SOURCE);
    candidates
}

/// Pick a bounded representative subset of `chunks`, grouped by source.
///
/// Sources appear in the output in order of first appearance in the input.
/// Within a source, chunks are ordered by `chunk_order` when every member
/// carries one, otherwise by `(page, paragraph, insertion index)`, and the
/// first/middle/last indices from [`pick_chunk_indices`] are selected.
pub fn select_representative(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut source_order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<(usize, Chunk)>> = HashMap::new();

    for (insertion_idx, chunk) in chunks.into_iter().enumerate() {
        let source = chunk.meta.source.clone();
        if !grouped.contains_key(&source) {
            source_order.push(source.clone());
        }
        grouped.entry(source).or_default().push((insertion_idx, chunk));
    }

    let mut selected = Vec::new();
    for source in source_order {
        let mut items = match grouped.remove(&source) {
            Some(items) => items,
            None => continue,
        };

        if items.iter().all(|(_, c)| c.meta.chunk_order.is_some()) {
            items.sort_by_key(|(_, c)| c.meta.chunk_order.unwrap_or(u64::MAX));
        } else {
            items.sort_by_key(|(idx, c)| (c.meta.page, c.meta.paragraph, *idx));
        }

        let ordered: Vec<Chunk> = items.into_iter().map(|(_, c)| c).collect();
        for idx in pick_chunk_indices(ordered.len()) {
            selected.push(ordered[idx].clone());
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChunkMeta;

    fn chunk(source: &str, page: u32, paragraph: u32, order: Option<u64>, text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            meta: ChunkMeta {
                source: source.to_string(),
                page,
                paragraph,
                chunk_order: order,
            },
        }
    }

    #[test]
    fn empty_group_selects_nothing() {
        assert!(pick_chunk_indices(0).is_empty());
        assert!(select_representative(Vec::new()).is_empty());
    }

    #[test]
    fn single_chunk_selected_exactly_once() {
        assert_eq!(pick_chunk_indices(1), vec![0]);
        let selected = select_representative(vec![chunk("a.pdf", 1, 1, Some(0), "only")]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].text, "only");
    }

    #[test]
    fn twenty_chunks_capped_with_first_and_last_present() {
        let indices = pick_chunk_indices(20);
        assert!(indices.len() <= MAX_PER_SOURCE);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for expected in [0, 1, 2, 18, 19] {
            assert!(indices.contains(&expected), "missing index {}", expected);
        }
    }

    #[test]
    fn small_group_has_no_duplicates() {
        for n in 1..=6 {
            let indices = pick_chunk_indices(n);
            let mut deduped = indices.clone();
            deduped.dedup();
            assert_eq!(indices, deduped, "duplicates for n={}", n);
            assert!(indices.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn orders_by_chunk_order_when_present() {
        // Shuffled emission order; selection must follow chunk_order.
        let chunks = vec![
            chunk("a.pdf", 2, 1, Some(2), "third"),
            chunk("a.pdf", 1, 1, Some(0), "first"),
            chunk("a.pdf", 1, 2, Some(1), "second"),
        ];
        let selected = select_representative(chunks);
        assert_eq!(selected[0].text, "first");
        assert_eq!(selected[1].text, "second");
        assert_eq!(selected[2].text, "third");
    }

    #[test]
    fn falls_back_to_page_paragraph_for_legacy_rows() {
        let chunks = vec![
            chunk("a.pdf", 3, 1, None, "late"),
            chunk("a.pdf", 1, 2, None, "early-b"),
            chunk("a.pdf", 1, 1, None, "early-a"),
        ];
        let selected = select_representative(chunks);
        assert_eq!(selected[0].text, "early-a");
        assert_eq!(selected[1].text, "early-b");
        assert_eq!(selected[2].text, "late");
    }

    #[test]
    fn groups_are_independent_per_source() {
        let mut chunks = Vec::new();
        for i in 0..20 {
            chunks.push(chunk("big.pdf", 1, 1, Some(i), &format!("big-{}", i)));
        }
        chunks.push(chunk("small.pdf", 1, 1, Some(0), "small-only"));

        let selected = select_representative(chunks);
        let big: Vec<&Chunk> = selected.iter().filter(|c| c.meta.source == "big.pdf").collect();
        let small: Vec<&Chunk> = selected
            .iter()
            .filter(|c| c.meta.source == "small.pdf")
            .collect();
        assert!(big.len() <= MAX_PER_SOURCE);
        assert_eq!(small.len(), 1);
    }
}
