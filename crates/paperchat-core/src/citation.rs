//! Citation guardrail: recognizes inline page-citation markers.
//!
//! Generated answers must ground themselves in the retrieved context by
//! citing page numbers inline. This module is the pure validation half of
//! that contract: [`has_citation`] reports whether any recognized marker
//! appears anywhere in a text. The orchestrator converts a miss into the
//! fixed refusal — "the model didn't cite evidence" becomes "the system
//! refuses", never "the system guesses".
//!
//! Recognized surface forms, with or without enclosing ASCII or full-width
//! parentheses, where `N` is one or more digits:
//!
//! | Language | Form |
//! |----------|------|
//! | English  | `page N`, `p. N` (case-insensitive) |
//! | Chinese  | `第N页` |
//! | Danish   | `side N` |
//! | German   | `seite N` |
//!
//! False negatives on citation formats from unanticipated locales are an
//! accepted tradeoff; extending the table below covers a new locale
//! without touching orchestration logic.

use once_cell::sync::Lazy;
use regex::Regex;

/// Language-tagged citation marker patterns.
static CITATION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("en", r"(?i)[(（]?\s*\b(?:page|p\.)\s*\d+\s*[)）]?"),
        ("zh", r"[(（]?\s*第\s*\d+\s*页\s*[)）]?"),
        ("da", r"(?i)[(（]?\s*\bside\s+\d+\s*[)）]?"),
        ("de", r"(?i)[(（]?\s*\bseite\s+\d+\s*[)）]?"),
    ]
    .into_iter()
    .map(|(tag, pattern)| {
        let regex = Regex::new(pattern).expect("citation pattern must compile");
        (tag, regex)
    })
    .collect()
});

/// Returns true when `text` contains at least one recognized page-citation
/// marker in any supported locale. Pure function, no side effects.
pub fn has_citation(text: &str) -> bool {
    CITATION_PATTERNS.iter().any(|(_, re)| re.is_match(text))
}

/// Returns the marker pattern for a language tag, if one is registered.
pub fn pattern_for(language_tag: &str) -> Option<&'static Regex> {
    CITATION_PATTERNS
        .iter()
        .find(|(tag, _)| *tag == language_tag)
        .map(|(_, re)| re)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_english_forms() {
        assert!(has_citation("The algorithm is described early on (page 3)."));
        assert!(has_citation("See page 3 for details."));
        assert!(has_citation("Covered in the intro (p. 12)."));
        assert!(has_citation("IT IS ON PAGE 7."));
    }

    #[test]
    fn accepts_chinese_forms() {
        assert!(has_citation("该算法用于聚类（第3页）。"));
        assert!(has_citation("该算法用于聚类，见第3页。"));
        assert!(has_citation("(第12页)"));
    }

    #[test]
    fn accepts_danish_and_german_forms() {
        assert!(has_citation("Algoritmen beskrives tidligt (side 5)."));
        assert!(has_citation("Der Algorithmus wird beschrieben (seite 7)."));
        assert!(has_citation("Siehe Seite 7."));
    }

    #[test]
    fn accepts_full_width_parentheses() {
        assert!(has_citation("答案在（第5页）中给出。"));
        assert!(has_citation("The answer is given （page 5）."));
    }

    #[test]
    fn rejects_uncited_text() {
        assert!(!has_citation(
            "The Canopy algorithm is used for clustering large datasets."
        ));
        assert!(!has_citation(""));
        assert!(!has_citation("This is on the next page of history."));
    }

    #[test]
    fn requires_a_number() {
        assert!(!has_citation("see page for details"));
        assert!(!has_citation("第页"));
    }

    #[test]
    fn pattern_lookup_by_tag() {
        assert!(pattern_for("en").is_some());
        assert!(pattern_for("zh").is_some());
        assert!(pattern_for("fr").is_none());
    }
}
