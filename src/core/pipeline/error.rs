use std::time::Duration;

use thiserror::Error;

use super::stage::PipelineStage;
use crate::core::audio::TransformError;
use crate::core::tts::SynthesisError;

/// Errors that end a synthesis request.
///
/// Classification problems never show up here; they degrade to a neutral
/// result inside the classifier adapter.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Base synthesis failed: {0}")]
    SynthesisUnavailable(#[from] SynthesisError),

    #[error("Base synthesis timed out after {}s", .0.as_secs_f32())]
    SynthesisTimeout(Duration),

    #[error("Audio transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// The stage a request was in when this kind of error is raised.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::InvalidInput(_) => PipelineStage::Idle,
            PipelineError::SynthesisUnavailable(_) | PipelineError::SynthesisTimeout(_) => {
                PipelineStage::BaseSynthesizing
            }
            PipelineError::Transform(_) | PipelineError::Internal(_) => PipelineStage::Transforming,
            PipelineError::Io(_) => PipelineStage::Encoded,
        }
    }

    /// Whether the caller could succeed by fixing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }
}

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;
