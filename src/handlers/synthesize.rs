use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::audio::AudioFormat;
use crate::core::emotion::AcousticProfile;
use crate::core::pipeline::{PipelineError, SynthesisRequest};
use crate::state::AppState;

/// Form body for `POST /`
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesizeForm {
    /// Missing and blank text are both rejected by the pipeline
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesizeResponse {
    pub emotion: String,
    pub confidence: f32,
    /// File name inside the static directory
    pub audio_file: String,
    /// Path the file is served under
    pub audio_url: String,
    pub profile: AcousticProfile,
}

/// Classifies the text, synthesizes it and writes `{static_dir}/{uuid}.mp3`.
///
/// Every request gets its own file name, so concurrent requests never
/// overwrite each other's output.
pub async fn synthesize_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SynthesizeForm>,
) -> Response {
    let audio_file = format!("{}.{}", Uuid::new_v4(), AudioFormat::Mp3.extension());
    let output_path = state.static_dir().join(&audio_file);
    let request = SynthesisRequest::new(form.text, output_path);

    info!(
        request_id = %request.id,
        chars = request.text.chars().count(),
        "Synthesis requested"
    );

    match state.pipeline.run(request).await {
        Ok(outcome) => {
            let response = SynthesizeResponse {
                emotion: outcome.classification.label().as_str().to_string(),
                confidence: outcome.classification.confidence(),
                audio_url: format!("/static/{audio_file}"),
                audio_file,
                profile: outcome.profile,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = status_for(&e);
            if e.is_client_error() {
                warn!("Rejected synthesis request: {}", e);
            } else {
                error!(stage = %e.stage(), "Synthesis failed: {}", e);
            }
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// HTTP status for a failed pipeline run.
pub fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PipelineError::SynthesisUnavailable(_) => StatusCode::BAD_GATEWAY,
        PipelineError::SynthesisTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        PipelineError::Transform(_) | PipelineError::Io(_) | PipelineError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
