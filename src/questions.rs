use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::text::{first_word, join_sentences, last_word, split_sentences};

/// Words that open an interrogative sentence.
pub const INTERROGATIVES: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which",
    "can", "could", "would", "will", "should",
    "do", "does", "did",
    "is", "are", "was", "were",
];

/// Tag phrases that turn a statement into a question when they open it.
const TAG_OPENERS: &[&str] = &[
    "isn't it",
    "don't you think",
    "wouldn't you agree",
    "correct me if",
    "am i right",
    "have you",
    "did you",
    "will you",
    "can you",
    "right",
];

/// Sentence-final hedges: "..., right." / "..., no."
const HEDGE_ENDINGS: &[&str] = &["though", "right", "eh", "no", "yes"];

/// Tag phrases appearing mid-sentence. Everything from the tag to the end of
/// the sentence is cut.
fn re_trailing_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)[,;:\s]*\b(?:isn['’]t it|don['’]t you think|wouldn['’]t you agree|am i right|correct me if)\b.*$",
        )
        .unwrap()
    })
}

/// Reduce a contracted word to the form checked against [`INTERROGATIVES`].
/// "isn't" -> "is", "what's" -> "what", "won't" -> "will".
///
/// Exact suffix matching: a word only loses a suffix that is actually there.
fn interrogative_stem(word: &str) -> String {
    let lower = word.to_lowercase().replace('\u{2019}', "'");
    match lower.as_str() {
        "can't" | "cannot" => return "can".to_string(),
        "won't" => return "will".to_string(),
        _ => {}
    }
    let suffixes = ["n't", "'ve", "'re", "'ll", "'s", "'d"];
    for suffix in &suffixes {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }
    lower
}

/// True if the sentence opens with a recognised interrogative word.
pub fn starts_with_interrogative(sentence: &str) -> bool {
    first_word(sentence)
        .map(|w| INTERROGATIVES.contains(&interrogative_stem(&w).as_str()))
        .unwrap_or(false)
}

fn starts_with_tag(sentence: &str) -> bool {
    let lower = sentence
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
        .replace('\u{2019}', "'");
    TAG_OPENERS.iter().any(|tag| {
        lower
            .strip_prefix(tag)
            .map(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
            .unwrap_or(false)
    })
}

fn ends_with_hedge(sentence: &str) -> bool {
    last_word(sentence)
        .map(|w| HEDGE_ENDINGS.contains(&w.as_str()))
        .unwrap_or(false)
}

/// Whether a sentence reads as a question once its `?` has been replaced.
pub fn is_question_sentence(sentence: &str) -> bool {
    starts_with_interrogative(sentence) || starts_with_tag(sentence) || ends_with_hedge(sentence)
}

/// Cut a mid-sentence tag question, keeping the statement before it.
fn cut_trailing_tag(sentence: &str) -> String {
    match re_trailing_tag().find(sentence) {
        Some(mat) if mat.start() > 0 => {
            let kept = sentence[..mat.start()].trim_end_matches(|c: char| {
                c.is_whitespace() || matches!(c, ',' | ';' | ':')
            });
            if kept.is_empty() {
                String::new()
            } else {
                format!("{}.", kept)
            }
        }
        Some(_) => String::new(),
        None => sentence.to_string(),
    }
}

/// Question filter, applied when questions are disallowed.
///
/// Every `?` becomes `.`, then sentences that open with an interrogative
/// word or tag phrase, or end in a hedge, are dropped. Mid-sentence tag
/// questions are cut. May return an empty string; later stages supply the
/// fallback.
pub fn remove_questions(text: &str) -> String {
    let replaced = text.replace('?', ".");
    let kept: Vec<String> = split_sentences(&replaced)
        .into_iter()
        .filter(|s| !is_question_sentence(s))
        .map(cut_trailing_tag)
        .filter(|s| !s.is_empty())
        .collect();
    let filtered = join_sentences(&kept);
    debug!(input = text, output = %filtered, "removed questions");
    filtered
}
