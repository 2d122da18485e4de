use tracing::debug;

use crate::boilerplate::{remove_banned_sentences, remove_boilerplate};
use crate::cleanup::{
    collapse_whitespace, complete_sentences, ensure_terminal_punctuation, fallback_line,
    final_cleanup, GENERIC_FALLBACK,
};
use crate::config::{CommentStyle, GenerationConfig};
use crate::filters::PhraseFilters;
use crate::flow::improve_sentence_flow;
use crate::normalize::fix_capitalization;
use crate::openers::tweak_openers;
use crate::post::SourcePost;
use crate::questions::remove_questions;
use crate::text::capitalize_first;

// ---------------------------------------------------------------------------
// Sealing
// ---------------------------------------------------------------------------

/// Whitespace, terminal punctuation and first-letter casing.
fn tidy(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    capitalize_first(&ensure_terminal_punctuation(collapsed.trim()))
}

fn question_free(text: &str) -> String {
    tidy(&remove_questions(text))
}

/// Enforce the processed-comment guarantees on any text: non-empty,
/// capitalized, terminated by `.`, `!` or `?`, and, when questions are
/// disallowed, free of `?` and of sentences opening with an interrogative.
///
/// Runs last in the pipeline and again after de-identification.
pub fn seal(text: &str, include_questions: bool, post_content: &str) -> String {
    let mut out = tidy(text);
    if !include_questions {
        out = question_free(&out);
    }

    if out.is_empty() {
        out = tidy(&fallback_line(post_content));
        if !include_questions {
            out = question_free(&out);
        }
    }

    if out.is_empty() {
        out = GENERIC_FALLBACK.to_string();
    }
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The comment post-processing pipeline. Holds the compiled phrase lists;
/// otherwise stateless.
#[derive(Debug, Clone, Default)]
pub struct PostProcessor {
    filters: PhraseFilters,
}

impl PostProcessor {
    pub fn new(filters: PhraseFilters) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &PhraseFilters {
        &self.filters
    }

    /// Run every stage over a raw completion.
    ///
    /// The result is never empty: stages that filter everything away are
    /// recovered with fallback text built from the post.
    pub fn process(&self, raw: &str, config: &GenerationConfig, post: &SourcePost) -> String {
        debug!(raw, "processing completion");

        // Pipeline (order matters -- boilerplate sees repaired sentences):
        let text = fix_capitalization(raw); // Step 1
        let text = if config.include_questions {
            text
        } else {
            remove_questions(&text) // Step 2
        };
        let text = improve_sentence_flow(&text); // Step 3
        let text = remove_boilerplate(&text, &self.filters); // Step 4
        let text = tweak_openers(&text); // Step 5
        let text = final_cleanup(&text, &post.content); // Step 6
        let text = match config.comment_style {
            CommentStyle::Casual => complete_sentences(&text), // Step 7
            CommentStyle::Professional => text,
        };
        let text = remove_banned_sentences(&text, &self.filters, &post.content); // Step 8
        let text = seal(&text, config.include_questions, &post.content); // Step 9

        debug!(output = %text, "processed completion");
        text
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::starts_with_interrogative;
    use crate::text::split_sentences;

    fn no_questions() -> GenerationConfig {
        GenerationConfig::default()
    }

    fn with_questions() -> GenerationConfig {
        GenerationConfig {
            include_questions: true,
            ..GenerationConfig::default()
        }
    }

    fn process(raw: &str, config: &GenerationConfig, post: &str) -> String {
        PostProcessor::default().process(raw, config, &SourcePost::new(post))
    }

    // ================================================================
    // END-TO-END SCENARIOS
    // ================================================================

    /// Broken generator output with a question, questions disabled.
    #[test]
    fn test_scenario_question_and_fragment() {
        let result = process(
            "This is a test. What do you think? This shows People really.. fix this.",
            &no_questions(),
            "A test post",
        );
        assert!(!result.contains('?'), "got: {}", result);
        for sentence in split_sentences(&result) {
            assert!(!sentence.starts_with("What"), "got: {}", result);
        }
        assert!(result.ends_with(|c: char| matches!(c, '.' | '!' | '?')));
        assert_eq!(result, "This is a test. This really shows how people Fix this.");
    }

    #[test]
    fn test_questions_kept_when_enabled() {
        let result = process(
            "Great reminder about hygiene! Does can material matter?",
            &with_questions(),
            "hygiene",
        );
        assert_eq!(result, "Great reminder about hygiene! Does can material matter?");
    }

    #[test]
    fn test_jargon_and_boilerplate_cleaned_together() {
        let result = process(
            "option 1: in today's fast-paced world, we must adapt. teams leverage small wins daily.",
            &no_questions(),
            "small wins",
        );
        assert_eq!(result, "Teams use small wins daily.");
    }

    #[test]
    fn test_duplicate_sentences_removed() {
        let result = process(
            "Delegation is the unlock. delegation is the unlock. Systems first.",
            &no_questions(),
            "",
        );
        assert_eq!(result, "Delegation is the unlock. Systems first.");
    }

    #[test]
    fn test_banned_sentence_guard_runs_after_cleanup() {
        let result = process(
            "It is a fundamental change for teams. Systems beat heroics.",
            &no_questions(),
            "",
        );
        assert_eq!(result, "Systems beat heroics.");
    }

    #[test]
    fn test_paradigm_shift_dropped_after_jargon_rewrite() {
        let result = process(
            "A paradigm shift for teams. Ship weekly.",
            &no_questions(),
            "",
        );
        assert_eq!(result, "Ship weekly.");
    }

    #[test]
    fn test_opener_rewrite_keeps_both_sentences() {
        let result = process("This works. Data highlights trends.", &no_questions(), "");
        assert_eq!(result, "This works. Data highlights trends.");
    }

    // ================================================================
    // DEGENERACY AND FALLBACKS
    // ================================================================

    #[test]
    fn test_all_questions_falls_back_to_post_snippet() {
        let result = process(
            "What do you think? How would you start?",
            &no_questions(),
            "Tracking daily wins changed my year",
        );
        assert_eq!(result, "Interesting takeaway here: Tracking daily wins changed my year.");
    }

    #[test]
    fn test_fallback_snippet_is_made_question_free() {
        let result = process(
            "Why? How?",
            &no_questions(),
            "What is your biggest lesson? Mine is patience.",
        );
        assert!(!result.contains('?'), "got: {}", result);
        for sentence in split_sentences(&result) {
            assert!(!starts_with_interrogative(sentence), "got: {}", result);
        }
    }

    #[test]
    fn test_everything_filtered_without_post_uses_generic_line() {
        let result = process("Paradigm shift.", &no_questions(), "");
        assert_eq!(result, GENERIC_FALLBACK);
    }

    // ================================================================
    // HUMAN-STYLE VARIANT
    // ================================================================

    #[test]
    fn test_casual_style_completes_short_reactions() {
        let config = GenerationConfig {
            comment_style: CommentStyle::Casual,
            ..GenerationConfig::default()
        };
        let result = process(
            "so true! reflecting on small wins keeps motivation going.",
            &config,
            "small wins",
        );
        assert_eq!(
            result,
            "So true, this matches what I've seen firsthand. Reflecting on small wins keeps motivation going."
        );
    }

    #[test]
    fn test_professional_style_keeps_short_reactions() {
        let result = process(
            "so true! reflecting on small wins keeps motivation going.",
            &no_questions(),
            "small wins",
        );
        assert_eq!(result, "So true! Reflecting on small wins keeps motivation going.");
    }

    // ================================================================
    // SEAL
    // ================================================================

    #[test]
    fn test_seal_adds_terminal_and_capital() {
        assert_eq!(seal("  great   work ", true, ""), "Great work.");
    }

    #[test]
    fn test_seal_strips_questions_when_disallowed() {
        assert_eq!(seal("Nice. Is it scalable?", false, ""), "Nice.");
    }

    #[test]
    fn test_seal_never_empty() {
        assert_eq!(seal("", false, ""), GENERIC_FALLBACK);
        assert_eq!(seal("Who knows?", false, ""), GENERIC_FALLBACK);
        assert_eq!(
            seal("Who knows?", false, "Why?"),
            "Interesting takeaway here: Why."
        );
    }
}
