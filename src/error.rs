use thiserror::Error;

/// Errors surfaced to callers of the comment pipeline.
///
/// Stage-local degeneracy (every sentence filtered away) is not an error:
/// the pipeline recovers with fallback text. Only upstream and I/O failures
/// end up here.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Empty response from API")]
    EmptyUpstreamResult,

    #[error("Regeneration failed: {0}")]
    RegenerationFailure(Box<CommentError>),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommentError {
    /// Wrap a failure of the single allowed retry call.
    pub fn regeneration(source: CommentError) -> Self {
        CommentError::RegenerationFailure(Box::new(source))
    }
}
