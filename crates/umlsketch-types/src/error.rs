use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from diagram generation and rendering.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("description is required")]
    MissingDescription,

    #[error("description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("diagram code is required")]
    MissingCode,

    #[error("generation credential is not configured")]
    NotConfigured,

    #[error("access code mismatch")]
    Forbidden,

    #[error("failed to parse model response: {0}")]
    UpstreamParse(String),

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Errors from encoding markup into a rendering-service URL segment, or
/// decoding one back.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("compression error: {0}")]
    Compression(String),

    #[error("invalid encoded segment: {0}")]
    InvalidSegment(String),

    #[error("decoded markup is not valid UTF-8")]
    InvalidUtf8,
}
