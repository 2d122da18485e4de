use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Standalone one-word sentences the generator tends to emit, and the
/// clause each is expanded into.
pub const FRAGMENT_EXPANSIONS: &[(&str, &str)] = &[
    ("AI", "AI technology"),
    ("Mindset", "Mindset makes the difference"),
    ("Teamwork", "Teamwork makes this work"),
];

/// Ordered (pattern, replacement) rules. Order matters: the specific
/// "People really.." rewrites must run before the generic double-period
/// rule swallows them.
fn rules() -> &'static [(Regex, String)] {
    static RULES: OnceLock<Vec<(Regex, String)>> = OnceLock::new();
    RULES.get_or_init(|| {
        let mut rules = vec![
            (
                Regex::new(r"This shows People really\.\.").unwrap(),
                "This really shows how people".to_string(),
            ),
            (
                Regex::new(r"People really\.\.").unwrap(),
                "people can really".to_string(),
            ),
        ];

        for (fragment, expansion) in FRAGMENT_EXPANSIONS {
            let pattern = format!(r"(^|[.!?]\s+){}\.", regex::escape(fragment));
            rules.push((Regex::new(&pattern).unwrap(), format!("${{1}}{}.", expansion)));
        }

        // Truncated sentence ending in two periods: drop the dots
        rules.push((Regex::new(r"([a-z]+)\.\.").unwrap(), "$1".to_string()));

        // Short capitalized fragment trailing a complete sentence: "... Great."
        rules.push((
            Regex::new(r"([.!?])\s+[A-Z][a-z]{1,4}\s*\.\s*$").unwrap(),
            "$1".to_string(),
        ));

        rules
    })
}

/// Flow & fragment repair. Heuristic, not a grammar fixer.
pub fn improve_sentence_flow(text: &str) -> String {
    let mut improved = text.to_string();
    for (re, replacement) in rules() {
        improved = re.replace_all(&improved, replacement.as_str()).into_owned();
    }
    debug!(input = text, output = %improved, "improved sentence flow");
    improved
}
