use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Requested comment length. Drives the token budget and the length phrase
/// in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CommentLength {
    SuperShort,
    #[default]
    Brief,
    Concise,
    InLength,
    MultiParagraph,
}

impl CommentLength {
    /// Max output tokens requested from the API.
    pub fn max_output_tokens(self) -> u32 {
        match self {
            CommentLength::SuperShort => 80,
            CommentLength::Brief => 140,
            CommentLength::Concise => 220,
            CommentLength::InLength => 320,
            CommentLength::MultiParagraph => 460,
        }
    }

    /// Target character count quoted in the human-like prompt.
    pub fn target_chars(self) -> u32 {
        match self {
            CommentLength::SuperShort => 60,
            CommentLength::Brief => 120,
            CommentLength::Concise => 180,
            CommentLength::InLength => 280,
            CommentLength::MultiParagraph => 400,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            CommentLength::SuperShort => "Write 1-2 quick sentences (under 40 words).",
            CommentLength::Brief => "Write 2-3 sentences (about 50–90 words).",
            CommentLength::Concise => "Write 3-4 sentences (about 90–140 words).",
            CommentLength::InLength => {
                "Write a solid paragraph of 4–6 sentences (about 140–220 words)."
            }
            CommentLength::MultiParagraph => "Write 2 short paragraphs (up to ~300 words).",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Supportive,
    Excited,
    Happy,
    Gracious,
    Polite,
    Witty,
    #[default]
    Professional,
    Thoughtful,
}

impl Tone {
    /// Base sampling temperature. Tone has a real stylistic effect through it.
    pub fn temperature(self) -> f32 {
        match self {
            Tone::Supportive => 0.6,
            Tone::Excited => 0.9,
            Tone::Happy => 0.75,
            Tone::Gracious => 0.55,
            Tone::Polite => 0.55,
            Tone::Witty => 0.85,
            Tone::Professional => 0.5,
            Tone::Thoughtful => 0.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Supportive => "supportive",
            Tone::Excited => "excited",
            Tone::Happy => "happy",
            Tone::Gracious => "gracious",
            Tone::Polite => "polite",
            Tone::Witty => "witty",
            Tone::Professional => "professional",
            Tone::Thoughtful => "thoughtful",
        }
    }
}

/// Prompt family. `Casual` selects the human-like prompt and the
/// human-style completeness pass in final cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
    #[default]
    Professional,
    Casual,
}

/// Read-only configuration for one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    pub comment_length: CommentLength,
    pub tone: Tone,
    /// Questions must be explicitly enabled.
    pub include_questions: bool,
    pub industry: String,
    pub comment_style: CommentStyle,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            comment_length: CommentLength::Brief,
            tone: Tone::Professional,
            include_questions: false,
            industry: "general".to_string(),
            comment_style: CommentStyle::Professional,
        }
    }
}
