//! Text rewrite handlers.
//!
//! Both endpoints try the external provider first and degrade to the local
//! keyword-substitution rewrite when it is unconfigured or fails, so a
//! rewrite request always succeeds.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use serein_core::heuristics::{
    clean_rewritten, fallback_rewrite, split_rewritten, truncate_title,
};
use serein_core::{Task, TaskError, TaskPatch};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::server::AppState;

/// Request body for a standalone text rewrite.
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "professional".to_string()
}

/// Which task field a rewrite targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RewriteTarget {
    Title,
    Description,
    #[default]
    Both,
}

/// Request body for rewriting a task in place.
#[derive(Debug, Deserialize)]
pub struct TaskRewriteRequest {
    #[serde(default)]
    pub target: RewriteTarget,
    #[serde(default = "default_style")]
    pub style: String,
}

/// Run the external provider, falling back to the local rewrite on any
/// failure. Returns the rewritten text and whether the fallback was used.
async fn rewrite_or_fallback(state: &AppState, text: &str, style: &str) -> (String, bool) {
    if state.rewriter.is_configured() {
        match state.rewriter.rewrite(text, style).await {
            Ok(rewritten) => return (rewritten, false),
            Err(e) => {
                warn!(provider = state.rewriter.name(), error = %e, "rewrite failed, using local fallback");
            }
        }
    }
    (fallback_rewrite(text, style), true)
}

/// Rewrite a free-standing piece of text.
pub async fn rewrite_text(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RewriteRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(TaskError::validation("Le texte est requis").into());
    }

    let (rewritten, fallback) = rewrite_or_fallback(&state, &request.text, &request.style).await;
    info!(style = %request.style, fallback, "text rewritten");

    Ok(Json(json!({
        "success": true,
        "rewrittenText": rewritten,
        "originalText": request.text,
        "style": request.style,
        "timestamp": Utc::now(),
    })))
}

/// Rewrite a task's title and/or description and persist the result.
pub async fn rewrite_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(request): JsonBody<TaskRewriteRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state.store.get(id).await?;
    let text = compose_rewrite_text(&task, request.target);

    let (rewritten, fallback) = rewrite_or_fallback(&state, &text, &request.style).await;
    let cleaned = clean_rewritten(&rewritten);

    let patch = match request.target {
        RewriteTarget::Title => TaskPatch {
            title: Some(truncate_title(&cleaned)),
            ..TaskPatch::default()
        },
        RewriteTarget::Description => TaskPatch {
            description: Some(cleaned),
            ..TaskPatch::default()
        },
        RewriteTarget::Both => {
            let (title, description) = split_rewritten(&cleaned);
            TaskPatch {
                title: Some(title),
                description: Some(description),
                ..TaskPatch::default()
            }
        }
    };

    let updated = state.store.update(id, patch).await?;
    info!(id, target = ?request.target, fallback, "task rewritten");
    Ok(Json(updated))
}

/// Build the provider input for a task rewrite.
///
/// A `both` rewrite of a task that already has a description sends the
/// `Titre:`/`Description:` structured form so the reply can be split back
/// into the two fields.
fn compose_rewrite_text(task: &Task, target: RewriteTarget) -> String {
    match target {
        RewriteTarget::Title => task.title.clone(),
        RewriteTarget::Description => {
            if task.description.trim().is_empty() {
                format!("Développer une description pour: {}", task.title)
            } else {
                task.description.clone()
            }
        }
        RewriteTarget::Both => {
            if task.description.trim().is_empty() {
                format!(
                    "Créer un titre professionnel et une description détaillée pour cette tâche: {}",
                    task.title
                )
            } else {
                format!("Titre: {}\n\nDescription: {}", task.title, task.description)
            }
        }
    }
}
