//! Chat orchestrator: QA, summarization, revision, and ingestion flows.
//!
//! [`ChatService`] wires the document index and the completion client
//! together and enforces the answer policy: questions are answered only
//! from retrieved context, every accepted answer carries an inline page
//! citation, and an answer without one is replaced by a fixed refusal.
//! Validation failures and refusals are ordinary outcomes here, not
//! errors; the typed errors cover infrastructure failures only.

use std::sync::Arc;

use tracing::{info, warn};

use paperchat_core::chunk::chunk_pages;
use paperchat_core::citation::has_citation;
use paperchat_core::models::{last_assistant_turn, ConversationTurn, ScoredChunk, SourceRef};
use paperchat_core::select::select_representative;

use crate::error::{ChatError, GenerationError, IngestError};
use crate::extract::extract_pdf_pages;
use crate::index::DocIndex;
use crate::llm::CompletionClient;
use crate::prompts;

/// Returned for empty or whitespace-only input; no model call is made.
pub const VALIDATION_MESSAGE: &str = "please provide a valid question";

/// Returned when nothing relevant is retrieved or the model's answer
/// lacks a citation.
pub const REFUSAL_MESSAGE: &str = "I cannot find the answer in the provided documents.";

/// Returned when summarization is requested against an empty corpus.
pub const EMPTY_CORPUS_MESSAGE: &str = "I cannot find any documents to summarize.";

/// A finished answer: the text shown to the user plus the provenance of
/// the chunks it was grounded in. Refusals and validation messages carry
/// no sources.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

impl Answer {
    fn message(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Per-file outcome of a batch ingestion. One bad file never aborts its
/// siblings.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// (file name, chunks stored)
    pub succeeded: Vec<(String, usize)>,
    /// (file name, failure description)
    pub failed: Vec<(String, String)>,
}

/// Tuning knobs the orchestrator needs from configuration.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub top_k: usize,
    pub max_chars: usize,
    pub overlap_chars: usize,
}

pub struct ChatService {
    index: Arc<DocIndex>,
    llm: Box<dyn CompletionClient>,
    options: ChatOptions,
}

impl ChatService {
    pub fn new(index: Arc<DocIndex>, llm: Box<dyn CompletionClient>, options: ChatOptions) -> Self {
        Self {
            index,
            llm,
            options,
        }
    }

    /// Single generation path shared by every flow: call the model, trim,
    /// and treat an empty reply as a failure.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let raw = self
            .llm
            .complete(prompt)
            .await
            .map_err(GenerationError::Model)?;
        let text = raw.trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    /// Answer a question from the ingested corpus.
    ///
    /// Empty input short-circuits to the validation message and an empty
    /// retrieval short-circuits to the refusal, both without calling the
    /// model. A generated answer is kept only if it carries an inline
    /// page citation the guardrail recognizes.
    pub async fn answer(
        &self,
        question: &str,
        language: &str,
        style: &str,
    ) -> Result<Answer, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(Answer::message(VALIDATION_MESSAGE));
        }

        let hits = self.index.retrieve_top_k(question, self.options.top_k).await?;
        if hits.is_empty() {
            info!(question, "no relevant chunks retrieved");
            return Ok(Answer::message(REFUSAL_MESSAGE));
        }

        let context = render_context(&hits);
        let prompt = prompts::qa_prompt(question, &context, language, style);
        let text = self.generate(&prompt).await?;

        if !has_citation(&text) {
            warn!(model = self.llm.model_name(), "answer lacked citation, refusing");
            return Ok(Answer::message(REFUSAL_MESSAGE));
        }

        Ok(Answer {
            text,
            sources: collect_sources(&hits),
        })
    }

    /// Summarize the whole corpus with a map/reduce pass over a small
    /// representative sample of chunks per source.
    pub async fn summarize(&self, language: &str, style: &str) -> Result<String, ChatError> {
        let chunks = self.index.retrieve_all().await?;
        if chunks.is_empty() {
            return Ok(EMPTY_CORPUS_MESSAGE.to_string());
        }

        let sample = select_representative(chunks);
        info!(sampled = sample.len(), "summarizing corpus sample");

        let mut summaries = Vec::with_capacity(sample.len());
        for chunk in &sample {
            let prompt = prompts::summary_map_prompt(&chunk.text, language, style);
            let summary = self.generate(&prompt).await?;
            summaries.push(format!("- [{}] {}", chunk.meta.source, summary));
        }

        let prompt = prompts::summary_reduce_prompt(&summaries.join("\n"), language, style);
        let overall = self.generate(&prompt).await?;
        Ok(overall)
    }

    /// Generate or revise workplace text from an intent, optionally
    /// grounded in template excerpts retrieved from the corpus and the
    /// previous assistant turn. No citation guardrail applies here.
    pub async fn revise(
        &self,
        intent: &str,
        language: &str,
        style: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ChatError> {
        let intent = intent.trim();
        if intent.is_empty() {
            return Ok(VALIDATION_MESSAGE.to_string());
        }

        let hits = self.index.retrieve_top_k(intent, self.options.top_k).await?;
        let template_context = if hits.is_empty() || !intent_matches_context(intent, &hits) {
            None
        } else {
            Some(render_context(&hits))
        };

        let previous = last_assistant_turn(history);
        let prompt =
            prompts::revision_prompt(intent, language, style, template_context.as_deref(), previous);
        Ok(self.generate(&prompt).await?)
    }

    /// Ingest one PDF: extract per-page text, chunk it, and replace any
    /// previously stored chunks for the same file name. A PDF with no
    /// extractable text stores nothing and reports zero chunks.
    pub async fn ingest(&self, bytes: &[u8], filename: &str) -> Result<usize, ChatError> {
        let pages = extract_pdf_pages(bytes).map_err(|e| IngestError::Extract {
            file: filename.to_string(),
            reason: e.to_string(),
        })?;

        let chunks = chunk_pages(
            &pages,
            filename,
            self.options.max_chars,
            self.options.overlap_chars,
        );
        if chunks.is_empty() {
            warn!(file = filename, "no extractable text, nothing stored");
            return Ok(0);
        }

        let stored = self.index.replace_source(filename, chunks).await?;
        info!(file = filename, chunks = stored, "ingested");
        Ok(stored)
    }

    /// Ingest a batch of PDFs independently, collecting per-file results.
    pub async fn ingest_files(&self, files: &[(String, Vec<u8>)]) -> IngestReport {
        let mut report = IngestReport::default();
        for (name, bytes) in files {
            match self.ingest(bytes, name).await {
                Ok(count) => report.succeeded.push((name.clone(), count)),
                Err(e) => {
                    warn!(file = name.as_str(), error = %e, "ingestion failed");
                    report.failed.push((name.clone(), e.to_string()));
                }
            }
        }
        report
    }

    /// Remove all chunks for the named sources; returns how many names
    /// completed without a storage error.
    pub async fn delete_sources(&self, names: &[String]) -> usize {
        self.index.delete_sources(names).await
    }

    /// Distinct source names with chunk counts, name-ordered.
    pub async fn sources(&self) -> Result<Vec<(String, u64)>, ChatError> {
        let chunks = self.index.retrieve_all().await?;
        let mut counts = std::collections::BTreeMap::new();
        for chunk in chunks {
            *counts.entry(chunk.meta.source).or_insert(0u64) += 1;
        }
        Ok(counts.into_iter().collect())
    }
}

/// Render retrieved chunks into the prompt context, one page-labelled
/// block per chunk.
fn render_context(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .map(|h| format!("(page {}) {}", h.chunk.meta.page, h.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Provenance for each retrieved chunk, deduplicated in retrieval order.
fn collect_sources(hits: &[ScoredChunk]) -> Vec<SourceRef> {
    let mut seen = std::collections::HashSet::new();
    let mut sources = Vec::new();
    for hit in hits {
        let source_ref = SourceRef {
            page: hit.chunk.meta.page,
            source: hit.chunk.meta.source.clone(),
            paragraph: hit.chunk.meta.paragraph,
        };
        let key = (
            source_ref.source.clone(),
            source_ref.page,
            source_ref.paragraph,
        );
        if seen.insert(key) {
            sources.push(source_ref);
        }
    }
    sources
}

/// Cheap lexical relevance check for the revision flow: at least one
/// intent word of three or more characters must appear in the retrieved
/// text, case-insensitively. Keeps unrelated template excerpts out of
/// the prompt when the vector search returns whatever is least distant.
fn intent_matches_context(intent: &str, hits: &[ScoredChunk]) -> bool {
    let haystack: String = hits
        .iter()
        .map(|h| h.chunk.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    intent
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| w.chars().count() >= 3)
        .any(|w| haystack.contains(&w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperchat_core::models::{Chunk, ChunkMeta};

    fn hit(text: &str, source: &str, page: u32, paragraph: u32) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                text: text.to_string(),
                meta: ChunkMeta {
                    source: source.to_string(),
                    page,
                    paragraph,
                    chunk_order: None,
                },
            },
            score: 0.9,
        }
    }

    #[test]
    fn render_context_labels_pages() {
        let hits = vec![hit("alpha", "a.pdf", 1, 1), hit("beta", "a.pdf", 2, 1)];
        let context = render_context(&hits);
        assert!(context.contains("(page 1) alpha"));
        assert!(context.contains("(page 2) beta"));
    }

    #[test]
    fn collect_sources_dedups_in_order() {
        let hits = vec![
            hit("x", "a.pdf", 2, 1),
            hit("y", "b.pdf", 1, 3),
            hit("z", "a.pdf", 2, 1),
        ];
        let sources = collect_sources(&hits);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].source, "a.pdf");
        assert_eq!(sources[0].page, 2);
        assert_eq!(sources[1].source, "b.pdf");
    }

    #[test]
    fn intent_match_requires_a_shared_word() {
        let hits = vec![hit("Dear team, the quarterly report is attached.", "t.pdf", 1, 1)];
        assert!(intent_matches_context("revise the quarterly report", &hits));
        assert!(!intent_matches_context("birthday invitation", &hits));
        // words under three characters never match on their own
        assert!(!intent_matches_context("is it ok", &hits));
    }
}
