//! Task CRUD and export handlers.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use serein_core::view::{filter_and_sort, TaskFilter, TaskSort};
use serein_core::{NewTask, Task, TaskPatch};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::server::AppState;

/// Query parameters for the task list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: TaskFilter,
    #[serde(default)]
    pub sort: TaskSort,
}

/// List tasks, optionally filtered by status and re-sorted.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(filter_and_sort(tasks, query.filter, query.sort)))
}

/// Create a task. The stress level and creation-time suggestions are
/// computed server-side.
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.store.create(new).await?;
    info!(id = task.id, stress = task.stress_level, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Merge a partial update into a task and return the full updated record.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(patch): JsonBody<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let task = state.store.update(id, patch).await?;
    info!(id, status = %task.status, "task updated");
    Ok(Json(task))
}

/// Delete a task.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(id).await?;
    info!(id, "task deleted");
    Ok(Json(json!({ "message": "Tâche supprimée avec succès" })))
}

/// Export every task as a downloadable JSON snapshot.
pub async fn export_tasks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = state.store.export_all().await?;
    info!(total = snapshot.total_tasks, "tasks exported");

    let response = (
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=tasks-export.json",
            ),
        ],
        Json(snapshot),
    );
    Ok(response.into_response())
}
