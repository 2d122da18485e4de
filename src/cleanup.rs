use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::text::{capitalize_first, is_terminal, join_sentences, split_sentences, truncate_chars, word_count};

/// Emitted when neither the comment nor the post content has anything usable.
pub const GENERIC_FALLBACK: &str = "Good insight with practical value.";

/// Human-style variant: emitted when no sentence survives the completeness pass.
pub const HUMAN_FALLBACK: &str = "This is a thoughtful point worth keeping in mind.";

/// Human-style variant: appended when the comment is still too short.
pub const ELABORATION: &str = "It's a practical reminder that small, consistent steps add up.";

/// How much post content the fallback line quotes.
pub const FALLBACK_SNIPPET_CHARS: usize = 80;

const MIN_SENTENCE_CHARS: usize = 10;
const MIN_SENTENCE_WORDS: usize = 3;
const MIN_COMMENT_CHARS: usize = 40;

/// Short reactions the generator emits on their own, and their completed form.
/// Keys are lowercase without terminal punctuation.
const COMPLETIONS: &[(&str, &str)] = &[
    ("so true", "So true, this matches what I've seen firsthand."),
    ("love this", "Love this, it's a practical reminder worth sharing."),
    ("great point", "Great point, and it's easy to overlook."),
    ("well said", "Well said, this is worth keeping in mind."),
    ("agreed", "Agreed, this is a useful way to frame it."),
    ("exactly", "Exactly, the details make the difference here."),
    ("spot on", "Spot on, this is how it plays out in practice."),
    ("100%", "Completely agree with this take."),
];

/// Phrases scrubbed in place during final cleanup.
fn re_stock_phrases() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)this shift represents a fundamental change in how professionals approach their craft\.?",
            r"|this resonates",
            r"|thanks for sharing",
            r"|great post",
            r"|arms race",
            r"|hyper[- ]specialization",
        ))
        .unwrap()
    })
}

fn re_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn re_periods() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.+").unwrap())
}

/// Collapse whitespace runs to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    re_whitespace().replace_all(text, " ").into_owned()
}

/// Ensure text ends with `.`, `!` or `?`. Dangling commas and colons are
/// dropped before the period goes on. Empty input stays empty.
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let trimmed = text.trim_end();
    match trimmed.chars().last() {
        None => String::new(),
        Some(c) if is_terminal(c) => trimmed.to_string(),
        Some(_) => {
            let base = trimmed.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':') || c.is_whitespace());
            if base.is_empty() {
                String::new()
            } else {
                format!("{}.", base)
            }
        }
    }
}

/// Fallback built from the post: "Interesting takeaway here: <snippet>".
/// Never empty.
pub fn fallback_line(post_content: &str) -> String {
    let snippet = truncate_chars(post_content.trim(), FALLBACK_SNIPPET_CHARS).trim();
    if snippet.is_empty() {
        return GENERIC_FALLBACK.to_string();
    }
    let line = ensure_terminal_punctuation(&format!("Interesting takeaway here: {}", snippet));
    if line.is_empty() {
        GENERIC_FALLBACK.to_string()
    } else {
        line
    }
}

/// Final cleanup & validation. Never returns an empty string; the result
/// always ends in terminal punctuation and starts capitalized.
pub fn final_cleanup(text: &str, post_content: &str) -> String {
    let cleaned = re_stock_phrases().replace_all(text, "");
    let cleaned = collapse_whitespace(&cleaned);
    let cleaned = re_periods().replace_all(&cleaned, ".");
    let cleaned = cleaned
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.');
    let cleaned = ensure_terminal_punctuation(cleaned);
    let cleaned = capitalize_first(&cleaned);

    let out = if cleaned.is_empty() {
        debug!("final cleanup left nothing, using fallback");
        fallback_line(post_content)
    } else {
        cleaned
    };
    debug!(input = text, output = %out, "final cleanup");
    out
}

fn completion_for(sentence: &str) -> Option<&'static str> {
    let key = sentence
        .trim()
        .trim_end_matches(|c: char| is_terminal(c) || c.is_whitespace())
        .to_lowercase();
    COMPLETIONS
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, full)| *full)
}

/// Human-style completeness pass.
///
/// Sentences under ten characters or three words are expanded from the
/// completion table when possible and dropped otherwise. If nothing
/// survives, [`HUMAN_FALLBACK`] is used; if the result is still under forty
/// characters, [`ELABORATION`] is appended.
pub fn complete_sentences(text: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    for sentence in split_sentences(text) {
        let too_short = sentence.chars().count() < MIN_SENTENCE_CHARS
            || word_count(sentence) < MIN_SENTENCE_WORDS;
        if !too_short {
            kept.push(ensure_terminal_punctuation(sentence));
            continue;
        }
        match completion_for(sentence) {
            Some(full) => kept.push(full.to_string()),
            None => debug!(sentence, "dropped incomplete sentence"),
        }
    }

    let mut out = if kept.is_empty() {
        HUMAN_FALLBACK.to_string()
    } else {
        join_sentences(&kept)
    };

    if out.chars().count() < MIN_COMMENT_CHARS {
        out.push(' ');
        out.push_str(ELABORATION);
    }
    capitalize_first(&out)
}
