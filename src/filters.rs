use std::sync::OnceLock;

use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::CommentError;

/// Stock phrases and generic openers dropped sentence by sentence by the
/// boilerplate remover. Case-insensitive regexes. The jargon table has
/// already turned "paradigm" into "way" by the time these run.
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    r"This\s+shift\s+represents\s+a\s+fundamental\s+change\s+in\s+how\s+professionals\s+approach\s+their\s+craft\.?",
    r"This\s+represents\s+a\s+fundamental\s+shift\.?",
    r"This\s+marks\s+a\s+fundamental\s+shift\.?",
    r"A\s+fundamental\s+change\s+in\s+how\s+professionals\s+approach\s+their\s+craft\.?",
    r"fundamental\s+shift",
    r"At the end of the day,",
    r"In today['’]?s (fast-paced|rapidly changing) world",
    r"paradigm\s+shift",
    r"\bway\s+shift\b",
    r"ever-?evolving\s+landscape",
    r"This\s+.*\s+highlights\b",
    r"I['’]?ve\s+noticed\b",
    r"The\s+real\s+impact\s+lies\b",
    r"Which\s+of\s+these\s+frameworks\s+resonates\b",
];

/// Last-line guard applied after final cleanup. Case-insensitive regexes.
pub const DEFAULT_BANNED_SENTENCES: &[&str] = &[
    r"fundamental\s+change",
    r"approach\s+their\s+craft",
    r"paradigm\s+shift",
    r"\bway\s+shift\b",
    r"ever-?evolving\s+landscape",
];

/// Phrases that make the diversity gate re-roll a candidate. Plain
/// case-insensitive substrings, also quoted back in the RESTRICTIONS block.
pub const DEFAULT_GATE_PHRASES: &[&str] = &[
    "fundamental change",
    "approach their craft",
    "at the end of the day",
    "in today's fast-paced",
    "paradigm shift",
    "ever-evolving landscape",
    "highlights why",
    "i've noticed",
    "the real impact lies",
    "which of these frameworks resonates",
];

/// The three phrase lists. They overlap but are kept separate so each
/// stage can be tuned on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterLists {
    pub boilerplate: Vec<String>,
    pub banned_sentences: Vec<String>,
    pub gate_phrases: Vec<String>,
}

impl Default for FilterLists {
    fn default() -> Self {
        Self {
            boilerplate: to_owned_list(DEFAULT_BOILERPLATE),
            banned_sentences: to_owned_list(DEFAULT_BANNED_SENTENCES),
            gate_phrases: to_owned_list(DEFAULT_GATE_PHRASES),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Curly apostrophes count as straight ones for substring checks.
fn fold_apostrophes(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Compiled form of [`FilterLists`].
#[derive(Debug, Clone)]
pub struct PhraseFilters {
    boilerplate: RegexSet,
    banned_sentences: RegexSet,
    gate_phrases: Vec<String>,
}

impl PhraseFilters {
    /// Compile user-supplied lists. Fails on the first invalid pattern.
    pub fn compile(lists: &FilterLists) -> Result<Self, CommentError> {
        let boilerplate = RegexSetBuilder::new(&lists.boilerplate)
            .case_insensitive(true)
            .build()?;
        let banned_sentences = RegexSetBuilder::new(&lists.banned_sentences)
            .case_insensitive(true)
            .build()?;
        let gate_phrases = lists
            .gate_phrases
            .iter()
            .map(|p| fold_apostrophes(p))
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            boilerplate,
            banned_sentences,
            gate_phrases,
        })
    }

    /// The built-in lists, compiled once.
    pub fn defaults() -> Self {
        static DEFAULTS: OnceLock<PhraseFilters> = OnceLock::new();
        DEFAULTS
            .get_or_init(|| PhraseFilters::compile(&FilterLists::default()).unwrap())
            .clone()
    }

    pub fn is_boilerplate(&self, sentence: &str) -> bool {
        self.boilerplate.is_match(sentence)
    }

    pub fn is_banned_sentence(&self, sentence: &str) -> bool {
        self.banned_sentences.is_match(sentence)
    }

    /// Whole-text substring test used by the diversity gate.
    pub fn contains_gate_phrase(&self, text: &str) -> bool {
        let folded = fold_apostrophes(text);
        self.gate_phrases.iter().any(|p| folded.contains(p.as_str()))
    }

    pub fn gate_phrases(&self) -> &[String] {
        &self.gate_phrases
    }
}

impl Default for PhraseFilters {
    fn default() -> Self {
        Self::defaults()
    }
}
