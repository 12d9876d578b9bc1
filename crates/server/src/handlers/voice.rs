//! Voice transcript handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use serein_core::heuristics::parse_voice_transcript;
use serein_core::{NewTask, Task, TaskError};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::server::AppState;

/// Request body carrying a raw speech transcript.
#[derive(Debug, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub transcript: String,
}

/// Create a task from a voice transcript.
pub async fn create_from_voice(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<VoiceRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    if request.transcript.trim().is_empty() {
        return Err(TaskError::validation("La transcription est requise").into());
    }

    let parsed = parse_voice_transcript(&request.transcript);
    let task = state
        .store
        .create(NewTask {
            title: parsed.title,
            description: parsed.description,
            priority: parsed.priority,
            ..NewTask::default()
        })
        .await?;

    info!(id = task.id, priority = %task.priority, "task created from voice");
    Ok((StatusCode::CREATED, Json(task)))
}
