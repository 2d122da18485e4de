use std::collections::HashSet;

/// Terminal punctuation recognised at sentence boundaries.
pub fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
///
/// The punctuation stays attached to its sentence. Runs like `..` only end a
/// sentence at the last character of the run, so "really.. fix" splits into
/// "really.." and "fix". Empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        let boundary = matches!(chars.peek(), Some((_, next)) if next.is_whitespace());
        if boundary {
            let end = i + c.len_utf8();
            let piece = text[start..end].trim();
            if !piece.is_empty() {
                sentences.push(piece);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Rejoin sentences with single spaces.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    sentences
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First word of a sentence, lowercased, ignoring leading punctuation or quotes.
pub fn first_word(sentence: &str) -> Option<String> {
    sentence
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .next()
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Last word of a sentence, lowercased, ignoring trailing punctuation.
pub fn last_word(sentence: &str) -> Option<String> {
    sentence
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .rsplit(|c: char| !c.is_alphanumeric())
        .next()
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words used by the similarity check: lowercase ASCII alphanumerics,
/// longer than two characters, deduplicated.
pub fn similarity_words(text: &str) -> HashSet<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Content words used for the concrete-reference check: lowercase ASCII
/// alphanumeric runs of at least four characters.
pub fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|w| w.len() >= 4)
        .map(str::to_string)
        .collect()
}

/// Jaccard index over [`similarity_words`]. Zero when either side has no words.
pub fn similarity(a: &str, b: &str) -> f64 {
    let words_a = similarity_words(a);
    let words_b = similarity_words(b);
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Count of content words shared between two texts.
pub fn shared_content_words(a: &str, b: &str) -> usize {
    let words_a = content_words(a);
    let words_b = content_words(b);
    words_a.intersection(&words_b).count()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
