use std::collections::HashSet;

use tracing::debug;

use crate::cleanup::fallback_line;
use crate::filters::PhraseFilters;
use crate::text::{join_sentences, split_sentences};

/// Boilerplate & duplicate remover.
///
/// Splits into sentences, drops any that match the boilerplate list, then
/// drops case-insensitive repeats (first occurrence wins). Surviving
/// sentences keep their original order and are rejoined with single spaces.
pub fn remove_boilerplate(text: &str, filters: &PhraseFilters) -> String {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for sentence in split_sentences(text) {
        if filters.is_boilerplate(sentence) {
            debug!(sentence, "dropped boilerplate sentence");
            continue;
        }
        if !seen.insert(sentence.to_lowercase()) {
            debug!(sentence, "dropped duplicate sentence");
            continue;
        }
        cleaned.push(sentence);
    }

    join_sentences(&cleaned)
}

/// Banned-sentence guard, run after final cleanup.
///
/// Drops every sentence matching the banned list. If nothing survives,
/// substitutes the fallback line built from the post content.
pub fn remove_banned_sentences(text: &str, filters: &PhraseFilters, post_content: &str) -> String {
    let kept: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| !filters.is_banned_sentence(s))
        .collect();

    let out = join_sentences(&kept);
    if out.trim().is_empty() {
        debug!("banned-sentence guard emptied the comment, using fallback");
        return fallback_line(post_content);
    }
    out
}
