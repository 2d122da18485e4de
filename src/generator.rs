use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::diversity::CommentSession;
use crate::error::CommentError;
use crate::post::{SourcePost, UserProfile};
use crate::prompt::build_prompt;

/// Fixed nucleus sampling settings sent with every request.
pub const TOP_K: u32 = 24;
pub const TOP_P: f32 = 0.85;

/// Sampling parameters for one text-generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl SamplingParams {
    /// Temperature from the tone, token budget from the length.
    pub fn for_config(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.tone.temperature(),
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: config.comment_length.max_output_tokens(),
        }
    }

    pub fn with_temperature(self, temperature: f32) -> Self {
        Self {
            temperature,
            ..self
        }
    }
}

/// Opaque text-completion collaborator.
///
/// This is the only boundary to the language-model API. The diversity gate
/// uses the same hook for its single regeneration.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, CommentError>;
}

/// Generate one comment for a post: build the prompt, call the generator,
/// then post-process and diversity-check the result through `session`.
pub async fn generate_comment<G>(
    generator: &G,
    session: &mut CommentSession,
    config: &GenerationConfig,
    post: &SourcePost,
    profile: Option<&UserProfile>,
) -> Result<String, CommentError>
where
    G: TextGenerator + ?Sized,
{
    info!(
        length = ?config.comment_length,
        tone = config.tone.as_str(),
        style = ?config.comment_style,
        include_questions = config.include_questions,
        profile = profile.is_some(),
        "generating comment"
    );

    let prompt = build_prompt(post, config, profile);
    debug!(prompt_chars = prompt.chars().count(), "prompt built");

    let raw = generator
        .complete(&prompt, &SamplingParams::for_config(config))
        .await?;

    session.process_comment(&raw, config, post, &prompt, generator).await
}
