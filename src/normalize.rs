use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

/// Business jargon and its plain replacement. Matched case-insensitively on
/// whole words; multi-word entries must match exactly.
pub const JARGON_TABLE: &[(&str, &str)] = &[
    ("facilitate", "help"),
    ("utilize", "use"),
    ("demonstrate", "show"),
    ("leverage", "use"),
    ("optimize", "improve"),
    ("paradigm", "way"),
    ("ecosystem", "system"),
    ("hyper-specialization", "specialization"),
    ("content arms race", "content competition"),
    ("value proposition", "value"),
];

/// Markdown-bold option headers: "**Option 2** ..." or "**Option 2: Short**"
fn re_bold_option() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\*\*\s*Option\s+\d+[^*]*\*\*\s*").unwrap())
}

/// Plain option labels: "Option 1:", "option 3 -"
fn re_option_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bOption\s+\d+\s*[:.)\-]?\s*").unwrap())
}

/// Numbered list markers at line start: "1. ", "2) "
fn re_line_number_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\d+[.)][ \t]+").unwrap())
}

/// Numbered markers that follow a sentence end or a colon: "Two ideas: 1. Ship"
fn re_inline_number_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([.!?:])\s+\d+\.\s+").unwrap())
}

fn re_jargon() -> &'static [(Regex, &'static str)] {
    static RE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RE.get_or_init(|| {
        JARGON_TABLE
            .iter()
            .map(|(complex, simple)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(complex));
                (Regex::new(&pattern).unwrap(), *simple)
            })
            .collect()
    })
}

/// Lowercase letter at string start or after sentence-terminal punctuation.
fn re_sentence_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|[.!?]\s+)([a-z])").unwrap())
}

/// Remove "Option N" headers and numbered list markers.
pub fn strip_option_artifacts(text: &str) -> String {
    let text = re_bold_option().replace_all(text, "");
    let text = re_option_label().replace_all(&text, "");
    let text = re_line_number_marker().replace_all(&text, "");
    let text = re_inline_number_marker().replace_all(&text, "$1 ");
    text.into_owned()
}

/// Apply [`JARGON_TABLE`].
pub fn simplify_jargon(text: &str) -> String {
    let mut result = text.to_string();
    for (re, simple) in re_jargon() {
        result = re.replace_all(&result, *simple).into_owned();
    }
    result
}

/// Capitalize the string start and the first letter after `.`, `!` or `?`.
pub fn capitalize_sentence_starts(text: &str) -> String {
    re_sentence_start()
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Capitalization & lexical normalizer. Never fails.
pub fn fix_capitalization(text: &str) -> String {
    let fixed = strip_option_artifacts(text);
    let fixed = simplify_jargon(&fixed);
    let fixed = capitalize_sentence_starts(&fixed);
    debug!(input = text, output = %fixed, "normalized capitalization");
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    // ================================================================
    // OPTION ARTIFACTS
    // ================================================================

    #[test]
    fn test_option_label_removed() {
        assert_eq!(
            fix_capitalization("Option 1: great point on hiring."),
            "Great point on hiring."
        );
    }

    #[test]
    fn test_bold_option_header_removed() {
        let result = fix_capitalization("**Option 2: Casual** love this idea.");
        assert_eq!(result.trim(), "Love this idea.");
    }

    #[test]
    fn test_leading_number_markers_removed() {
        assert_eq!(
            strip_option_artifacts("1. First idea.\n2. Second idea."),
            "First idea.\nSecond idea."
        );
    }

    #[test]
    fn test_inline_number_marker_after_colon_removed() {
        assert_eq!(
            strip_option_artifacts("Two ideas: 1. Ship weekly."),
            "Two ideas: Ship weekly."
        );
    }

    #[test]
    fn test_decimal_numbers_preserved() {
        assert_eq!(
            fix_capitalization("Revenue grew 2.5x in 2024. Impressive."),
            "Revenue grew 2.5x in 2024. Impressive."
        );
    }

    // ================================================================
    // JARGON TABLE
    // ================================================================

    #[test]
    fn test_jargon_replaced_case_insensitively() {
        assert_eq!(
            simplify_jargon("We Utilize tools to FACILITATE growth."),
            "We use tools to help growth."
        );
    }

    #[test]
    fn test_jargon_whole_words_only() {
        assert_eq!(simplify_jargon("leveraged buyouts"), "leveraged buyouts");
        assert_eq!(simplify_jargon("paradigms"), "paradigms");
    }

    #[test]
    fn test_multi_word_jargon() {
        assert_eq!(
            simplify_jargon("The content arms race hurts the value proposition."),
            "The content competition hurts the value."
        );
        assert_eq!(
            simplify_jargon("Hyper-specialization is risky."),
            "specialization is risky."
        );
    }

    // ================================================================
    // CAPITALIZATION
    // ================================================================

    #[test]
    fn test_capitalizes_string_start_and_after_terminals() {
        assert_eq!(
            capitalize_sentence_starts("so true. this matters! why not? ok"),
            "So true. This matters! Why not? Ok"
        );
    }

    #[test]
    fn test_capitalizes_after_double_period() {
        assert_eq!(
            capitalize_sentence_starts("People really.. fix this."),
            "People really.. Fix this."
        );
    }

    #[test]
    fn test_full_normalizer_on_mixed_input() {
        assert_eq!(
            fix_capitalization("option 3: we leverage data. the ecosystem grows."),
            "We use data. The system grows."
        );
    }
}
