use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

/// "This <up to four words> highlights", within the first sentence.
fn re_this_highlights() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^This\s+((?:[^\s.!?]+\s+){0,3}?[^\s.!?]+)\s+highlights\b").unwrap()
    })
}

fn re_ive_noticed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^I['’]?ve\s+noticed\b").unwrap())
}

fn re_real_impact() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^The\s+real\s+impact\s+lies\b").unwrap())
}

/// Generic closing question the generator likes to append.
fn re_frameworks_question() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Which\s+of\s+these\s+frameworks\s+resonates[^.!?]*[.!?]").unwrap()
    })
}

/// Opener rewriter. Only the start of the string is rewritten; the one
/// trailing template question is stripped wherever it appears.
pub fn tweak_openers(text: &str) -> String {
    let t = text.trim();
    let t = re_this_highlights().replace(t, |caps: &Captures| {
        format!("What stands out here is how this {} brings out", &caps[1])
    });
    let t = re_ive_noticed().replace(&t, "One thing I've run into");
    let t = re_real_impact().replace(&t, "The value shows up");
    let t = re_frameworks_question().replace(&t, "");
    let tweaked = t.trim().to_string();
    debug!(input = text, output = %tweaked, "tweaked openers");
    tweaked
}
