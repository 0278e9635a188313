//! Prompt templates for the QA, summarization, and revision flows.

/// Inline citation marker example for the requested answer language.
///
/// Mirrors the locale table in `paperchat_core::citation`: the model is
/// asked to cite in a form the guardrail will recognize.
pub fn marker_example(language: &str) -> &'static str {
    let lang = language.to_lowercase();
    if lang.starts_with("zh") || lang.contains("chinese") || lang.contains("中文") {
        "(第3页)"
    } else if lang.starts_with("da") || lang.contains("danish") || lang.contains("dansk") {
        "(side 3)"
    } else if lang.starts_with("de") || lang.contains("german") || lang.contains("deutsch") {
        "(seite 3)"
    } else {
        "(page 3)"
    }
}

/// QA prompt: answer strictly from the retrieved context, citing pages
/// inline in the locale-appropriate marker form.
pub fn qa_prompt(question: &str, context: &str, language: &str, style: &str) -> String {
    format!(
        r#"You are a helpful assistant. Answer the question using ONLY the provided context.
If the answer is not in the context, say: "I cannot find the answer in the provided documents."

Respond in the requested language: {language}
Use the requested tone/style: {style}

Always include at least one inline page citation. Use "(page X)" in most cases; use "(第X页)" for Chinese, "(side X)" for Danish, and "(seite X)" for German. Pull page numbers from the provided context.
Keep the answer concise and cite page numbers inline, e.g., {example}.

Question: {question}

Context:
{context}
"#,
        language = language,
        style = style,
        example = marker_example(language),
        question = question,
        context = context,
    )
}

/// Map step: summarize one chunk in 1-2 sentences.
pub fn summary_map_prompt(chunk: &str, language: &str, style: &str) -> String {
    format!(
        r#"You are creating a brief summary of a PDF chunk.
Respond in the requested language: {language}. Use the requested tone/style: {style}.

Chunk:
{chunk}

Write a concise 1-2 sentence summary.
"#,
        language = language,
        style = style,
        chunk = chunk,
    )
}

/// Reduce step: one overall summary from the joined chunk summaries.
pub fn summary_reduce_prompt(summaries: &str, language: &str, style: &str) -> String {
    format!(
        r#"You are creating an overall summary from chunk summaries.
Respond in the requested language: {language}. Use the requested tone/style: {style}.

Chunk summaries:
{summaries}

Write a concise overall summary (3-5 sentences) highlighting the main idea and key points.
"#,
        language = language,
        style = style,
        summaries = summaries,
    )
}

/// Revision prompt: generate or incrementally edit workplace text from an
/// intent, optionally grounded in template excerpts and a previous version.
pub fn revision_prompt(
    intent: &str,
    language: &str,
    style: &str,
    template_context: Option<&str>,
    previous_version: Option<&str>,
) -> String {
    let mut prompt = format!(
        r#"You are a professional writing assistant for workplace communication, capable of generating effective and practical text based on the user's intent and desired tone.

intent: {intent}
style: {style}
language: {language}
"#,
        intent = intent,
        style = style,
        language = language,
    );

    if let Some(templates) = template_context {
        prompt.push_str(&format!(
            "\nTemplate excerpts to draw structure and phrasing from:\n{}\n",
            templates
        ));
    }

    match previous_version {
        Some(previous) => {
            prompt.push_str(&format!(
                "\nPrevious version to revise incrementally (keep what already works):\n{}\n\nPlease revise the previous version according to the intent.\n",
                previous
            ));
        }
        None => {
            prompt.push_str("\nPlease generate a suitable text based on the information provided.\n");
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_example_matches_language() {
        assert_eq!(marker_example("English"), "(page 3)");
        assert_eq!(marker_example("Chinese"), "(第3页)");
        assert_eq!(marker_example("zh-CN"), "(第3页)");
        assert_eq!(marker_example("Danish"), "(side 3)");
        assert_eq!(marker_example("German"), "(seite 3)");
        assert_eq!(marker_example("French"), "(page 3)");
    }

    #[test]
    fn qa_prompt_carries_all_fields() {
        let prompt = qa_prompt("What is canopy?", "ctx here", "English", "Formal");
        assert!(prompt.contains("What is canopy?"));
        assert!(prompt.contains("ctx here"));
        assert!(prompt.contains("English"));
        assert!(prompt.contains("Formal"));
        assert!(prompt.contains("(page 3)"));
    }

    #[test]
    fn revision_prompt_sections_are_optional() {
        let bare = revision_prompt("decline a meeting", "English", "Formal", None, None);
        assert!(bare.contains("generate a suitable text"));
        assert!(!bare.contains("Template excerpts"));

        let full = revision_prompt(
            "decline a meeting",
            "English",
            "Formal",
            Some("Dear X, ..."),
            Some("Hi team, v1"),
        );
        assert!(full.contains("Template excerpts"));
        assert!(full.contains("Hi team, v1"));
        assert!(full.contains("revise the previous version"));
    }
}
