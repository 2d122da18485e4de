//! Diversity and contextuality gate.
//!
//! A candidate comment is checked against the recent history and the source
//! post. If it carries a banned phrase, repeats a recent comment, or never
//! touches the post's content, it is regenerated exactly once with a
//! RESTRICTIONS block appended to the prompt. There is no second retry.

use std::collections::VecDeque;
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::CommentError;
use crate::filters::PhraseFilters;
use crate::generator::{SamplingParams, TextGenerator};
use crate::post::SourcePost;
use crate::post_process::{seal, PostProcessor};
use crate::text::{shared_content_words, similarity};

pub const HISTORY_CAPACITY: usize = 6;

/// Jaccard score above which a candidate counts as a repeat.
pub const SIMILARITY_THRESHOLD: f64 = 0.55;

/// Content words a comment must share with the post.
pub const MIN_CONCRETE_OVERLAP: usize = 1;

pub const TEMPERATURE_JITTER: f32 = 0.06;
pub const MIN_TEMPERATURE: f32 = 0.45;
pub const MAX_TEMPERATURE: f32 = 0.95;

// ---------------------------------------------------------------------------
// Recent history
// ---------------------------------------------------------------------------

/// Bounded most-recent-first queue of accepted comments.
#[derive(Debug, Clone)]
pub struct RecentHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push to the front, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, comment: impl Into<String>) {
        self.entries.push_front(comment.into());
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn is_too_similar(&self, candidate: &str) -> bool {
        self.iter()
            .any(|prev| similarity(candidate, prev) > SIMILARITY_THRESHOLD)
    }
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Outcome of evaluating a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateVerdict {
    pub has_banned: bool,
    pub too_similar: bool,
    pub lacks_concrete: bool,
}

impl GateVerdict {
    pub fn needs_regeneration(&self) -> bool {
        self.has_banned || self.too_similar || self.lacks_concrete
    }
}

/// At least one content word shared with the post.
pub fn has_concrete_reference(text: &str, post_content: &str) -> bool {
    shared_content_words(text, post_content) >= MIN_CONCRETE_OVERLAP
}

pub fn evaluate(
    candidate: &str,
    history: &RecentHistory,
    post_content: &str,
    filters: &PhraseFilters,
) -> GateVerdict {
    GateVerdict {
        has_banned: filters.contains_gate_phrase(candidate),
        too_similar: history.is_too_similar(candidate),
        lacks_concrete: !has_concrete_reference(candidate, post_content),
    }
}

// ---------------------------------------------------------------------------
// Regeneration inputs
// ---------------------------------------------------------------------------

/// Block appended to the original prompt for the single regeneration.
pub fn restrictions_block(gate_phrases: &[String], include_questions: bool) -> String {
    let avoid = gate_phrases
        .iter()
        .map(|p| format!("\"{}\"", p))
        .collect::<Vec<_>>()
        .join(", ");
    let question_rule = if include_questions {
        "- Ask a specific question tied to the quoted phrase."
    } else {
        "- Do not ask any questions."
    };
    format!(
        "\nRESTRICTIONS:\n\
         - Do NOT use: {}.\n\
         - Reference at least ONE concrete noun or phrase from the post (quote it).\n\
         - Avoid generic openers like \"This X highlights\" or \"I've noticed\".\n\
         {}\n\
         - Vary sentence lengths (mix short and medium).\n\
         - Keep the selected TONE and LENGTH constraints.",
        avoid, question_rule
    )
}

/// Base temperature nudged by up to ±0.06, clamped to [0.45, 0.95].
pub fn jittered_temperature<R: Rng + ?Sized>(base: f32, rng: &mut R) -> f32 {
    let jitter = rng.gen_range(-TEMPERATURE_JITTER..=TEMPERATURE_JITTER);
    (base + jitter).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

fn re_deictic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(This|That|It)\b").unwrap())
}

/// Cheap de-identification: delete the standalone words "This", "That" and
/// "It" (case-sensitive). Callers re-seal the result.
pub fn de_identify(text: &str) -> String {
    re_deictic().replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Per-session comment service: the pipeline, the recent history and the
/// random source used for temperature jitter.
///
/// Assumes one generation in flight at a time; `process_comment` takes
/// `&mut self`, so concurrent use needs external locking.
#[derive(Debug)]
pub struct CommentSession {
    processor: PostProcessor,
    history: RecentHistory,
    rng: StdRng,
}

impl CommentSession {
    pub fn new(processor: PostProcessor) -> Self {
        Self {
            processor,
            history: RecentHistory::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic jitter, for tests and replays.
    pub fn with_seed(processor: PostProcessor, seed: u64) -> Self {
        Self {
            processor,
            history: RecentHistory::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn processor(&self) -> &PostProcessor {
        &self.processor
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn accept(&mut self, comment: &str) {
        self.history.push(comment);
        debug!(history = self.history.len(), "accepted comment");
    }

    /// Process a raw completion into the final comment.
    ///
    /// GENERATED: run the pipeline and evaluate the gate. If any predicate
    /// fires, REGENERATE once through `regenerate` with the RESTRICTIONS
    /// block and a jittered temperature; a regenerated candidate that still
    /// repeats history is de-identified. ACCEPTED: push to history, return.
    pub async fn process_comment<G>(
        &mut self,
        raw: &str,
        config: &GenerationConfig,
        post: &SourcePost,
        base_prompt: &str,
        regenerate: &G,
    ) -> Result<String, CommentError>
    where
        G: TextGenerator + ?Sized,
    {
        if raw.trim().is_empty() {
            return Err(CommentError::EmptyUpstreamResult);
        }

        let candidate = self.processor.process(raw, config, post);
        let verdict = evaluate(&candidate, &self.history, &post.content, self.processor.filters());

        if !verdict.needs_regeneration() {
            self.accept(&candidate);
            return Ok(candidate);
        }

        info!(
            has_banned = verdict.has_banned,
            too_similar = verdict.too_similar,
            lacks_concrete = verdict.lacks_concrete,
            "regenerating comment"
        );

        let prompt = format!(
            "{}{}",
            base_prompt,
            restrictions_block(self.processor.filters().gate_phrases(), config.include_questions)
        );
        let temperature = jittered_temperature(config.tone.temperature(), &mut self.rng);
        let params = SamplingParams::for_config(config).with_temperature(temperature);

        let raw = regenerate
            .complete(&prompt, &params)
            .await
            .map_err(CommentError::regeneration)?;
        if raw.trim().is_empty() {
            return Err(CommentError::regeneration(CommentError::EmptyUpstreamResult));
        }

        let mut regenerated = self.processor.process(&raw, config, post);
        if self.history.is_too_similar(&regenerated) {
            debug!("regenerated comment still repeats history, de-identifying");
            regenerated = seal(&de_identify(&regenerated), config.include_questions, &post.content);
        }

        self.accept(&regenerated);
        Ok(regenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        replies: Mutex<Vec<Result<String, CommentError>>>,
        calls: Mutex<Vec<(String, SamplingParams)>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String, CommentError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CommentError> {
            self.calls.lock().unwrap().push((prompt.to_string(), *params));
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(CommentError::Network("script exhausted".to_string()));
            }
            replies.remove(0)
        }
    }

    fn session() -> CommentSession {
        CommentSession::with_seed(PostProcessor::default(), 42)
    }

    // ================================================================
    // RECENT HISTORY
    // ================================================================

    #[test]
    fn test_history_is_most_recent_first_and_bounded() {
        let mut history = RecentHistory::new();
        for i in 0..9 {
            history.push(format!("comment {}", i));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let entries: Vec<&str> = history.iter().collect();
        assert_eq!(entries.first(), Some(&"comment 8"));
        assert_eq!(entries.last(), Some(&"comment 3"));
    }

    #[test]
    fn test_history_clear() {
        let mut history = RecentHistory::new();
        history.push("one");
        history.clear();
        assert!(history.is_empty());
    }

    // ================================================================
    // PREDICATES
    // ================================================================

    #[test]
    fn test_concrete_reference_by_shared_word() {
        assert!(has_concrete_reference(
            "Love this simple yet powerful habit! Reflecting on small wins matters.",
            "One habit that changed my year: writing down a win every evening."
        ));
        assert!(!has_concrete_reference("Great stuff.", "Quarterly revenue grew"));
    }

    #[test]
    fn test_identical_history_entry_is_too_similar() {
        let mut history = RecentHistory::new();
        history.push("This is great advice.");
        let verdict = evaluate("This is great advice.", &history, "great advice", &PhraseFilters::defaults());
        assert!(verdict.too_similar);
        assert!(!verdict.has_banned);
        assert!(!verdict.lacks_concrete);
        assert!(verdict.needs_regeneration());
    }

    #[test]
    fn test_banned_phrase_detected_as_substring() {
        let verdict = evaluate(
            "At the end of the day, delegation wins.",
            &RecentHistory::new(),
            "delegation",
            &PhraseFilters::defaults(),
        );
        assert!(verdict.has_banned);
    }

    #[test]
    fn test_clean_candidate_passes() {
        let verdict = evaluate(
            "Delegation after systems is the unlock.",
            &RecentHistory::new(),
            "Delegation is hard",
            &PhraseFilters::defaults(),
        );
        assert_eq!(verdict, GateVerdict::default());
    }

    // ================================================================
    // REGENERATION INPUTS
    // ================================================================

    #[test]
    fn test_restrictions_block_lists_phrases() {
        let filters = PhraseFilters::defaults();
        let block = restrictions_block(filters.gate_phrases(), false);
        assert!(block.starts_with("\nRESTRICTIONS:"));
        assert!(block.contains("\"paradigm shift\""));
        assert!(block.contains("(quote it)"));
        assert!(block.contains("Do not ask any questions."));
        assert!(block.contains("Vary sentence lengths"));
        assert!(block.contains("Keep the selected TONE and LENGTH"));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let t = jittered_temperature(0.5, &mut rng);
            assert!((0.45..=0.5601).contains(&t), "{}", t);
            let hot = jittered_temperature(0.94, &mut rng);
            assert!(hot <= MAX_TEMPERATURE);
            let cold = jittered_temperature(0.40, &mut rng);
            assert!(cold >= MIN_TEMPERATURE);
        }
    }

    #[test]
    fn test_de_identify_is_case_sensitive() {
        assert_eq!(de_identify("This works. It is that simple."), " works.  is that simple.");
        assert_eq!(de_identify("Thistle and Items stay."), "Thistle and Items stay.");
    }

    // ================================================================
    // STATE MACHINE
    // ================================================================

    #[tokio::test]
    async fn test_accepts_without_regeneration() {
        let generator = Scripted::new(vec![]);
        let mut session = session();
        let post = SourcePost::new("Small daily habits compound.");

        let result = session
            .process_comment("Daily habits really do compound.", &GenerationConfig::default(), &post, "prompt", &generator)
            .await
            .unwrap();

        assert_eq!(result, "Daily habits really do compound.");
        assert_eq!(generator.call_count(), 0);
        assert_eq!(session.history().iter().next(), Some("Daily habits really do compound."));
    }

    #[tokio::test]
    async fn test_repeat_of_history_triggers_one_regeneration() {
        let generator = Scripted::new(vec![Ok("Shipping weekly keeps great advice honest.".to_string())]);
        let mut session = session();
        let post = SourcePost::new("Some great advice on shipping.");
        session.history.push("This is great advice.");

        let result = session
            .process_comment("This is great advice.", &GenerationConfig::default(), &post, "BASE PROMPT", &generator)
            .await
            .unwrap();

        assert_eq!(result, "Shipping weekly keeps great advice honest.");
        assert_eq!(generator.call_count(), 1);

        let calls = generator.calls.lock().unwrap();
        let (prompt, params) = &calls[0];
        assert!(prompt.starts_with("BASE PROMPT\nRESTRICTIONS:"));
        assert!((0.45..=0.5601).contains(&params.temperature));
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_gate_phrase_triggers_one_regeneration() {
        let generator = Scripted::new(vec![Ok("Shipping weekly keeps feedback fresh.".to_string())]);
        let mut session = session();
        let post = SourcePost::new("We ship weekly now.");

        let result = session
            .process_comment(
                "At the end of the day we ship weekly.",
                &GenerationConfig::default(),
                &post,
                "BASE",
                &generator,
            )
            .await
            .unwrap();

        assert_eq!(result, "Shipping weekly keeps feedback fresh.");
        assert_eq!(generator.call_count(), 1);
        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].0.contains("\"at the end of the day\""));
        assert_eq!(session.history().iter().next(), Some("Shipping weekly keeps feedback fresh."));
    }

    #[tokio::test]
    async fn test_missing_concrete_reference_triggers_regeneration() {
        let generator = Scripted::new(vec![Ok("The quarterly revenue jump is impressive.".to_string())]);
        let mut session = session();
        let post = SourcePost::new("Quarterly revenue up 40 percent.");

        let result = session
            .process_comment("Great stuff all around.", &GenerationConfig::default(), &post, "p", &generator)
            .await
            .unwrap();

        assert_eq!(result, "The quarterly revenue jump is impressive.");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_still_similar_after_regeneration_is_de_identified() {
        let generator = Scripted::new(vec![Ok("It is great advice. That helps teams.".to_string())]);
        let mut session = session();
        let post = SourcePost::new("great advice for teams");
        session.history.push("It is great advice. That helps teams.");

        let result = session
            .process_comment("It is great advice. That helps teams.", &GenerationConfig::default(), &post, "p", &generator)
            .await
            .unwrap();

        // "It" and "That" are deleted; the sentence left opening with "is"
        // reads as a question and is dropped by the seal.
        assert_eq!(result, "Helps teams.");
        assert_eq!(generator.call_count(), 1, "never more than one retry");
        assert_eq!(session.history().iter().next(), Some("Helps teams."));
    }

    #[tokio::test]
    async fn test_regeneration_failure_propagates() {
        let generator = Scripted::new(vec![Err(CommentError::Network("reset".to_string()))]);
        let mut session = session();
        let post = SourcePost::new("Quarterly revenue up.");

        let result = session
            .process_comment("Great stuff all around.", &GenerationConfig::default(), &post, "p", &generator)
            .await;

        match result {
            Err(CommentError::RegenerationFailure(cause)) => {
                assert!(matches!(*cause, CommentError::Network(_)));
            }
            other => panic!("expected regeneration failure, got {:?}", other),
        }
        assert!(session.history().is_empty(), "nothing accepted on failure");
    }

    #[tokio::test]
    async fn test_blank_regeneration_is_a_failure() {
        let generator = Scripted::new(vec![Ok("  ".to_string())]);
        let mut session = session();

        let result = session
            .process_comment("Great stuff.", &GenerationConfig::default(), &SourcePost::new("revenue"), "p", &generator)
            .await;

        assert!(matches!(result, Err(CommentError::RegenerationFailure(_))));
    }

    #[tokio::test]
    async fn test_blank_input_is_empty_upstream_result() {
        let generator = Scripted::new(vec![]);
        let mut session = session();

        let result = session
            .process_comment("", &GenerationConfig::default(), &SourcePost::new("post"), "p", &generator)
            .await;

        assert!(matches!(result, Err(CommentError::EmptyUpstreamResult)));
        assert_eq!(generator.call_count(), 0);
    }
}
