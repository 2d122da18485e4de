//! Post-processing and diversity gate for generated LinkedIn comments.

pub mod boilerplate;
pub mod cleanup;
pub mod config;
pub mod diversity;
pub mod error;
pub mod filters;
pub mod flow;
pub mod gemini;
pub mod generator;
pub mod normalize;
pub mod openers;
pub mod post;
pub mod post_process;
pub mod prompt;
pub mod questions;
pub mod settings;
pub mod text;

pub use config::{CommentLength, CommentStyle, GenerationConfig, Tone};
pub use diversity::{CommentSession, RecentHistory};
pub use error::CommentError;
pub use filters::{FilterLists, PhraseFilters};
pub use gemini::GeminiClient;
pub use generator::{generate_comment, SamplingParams, TextGenerator};
pub use post::{Experience, SourcePost, UserProfile};
pub use post_process::PostProcessor;
pub use settings::Settings;
