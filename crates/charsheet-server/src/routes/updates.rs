use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tokio::process::Command;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::{AppState, PendingUpdate};

#[derive(Debug, Deserialize)]
pub struct RegisterUpdate {
    pub message: String,
}

/// POST /api/update — register a pushed-commit notification for the operator
/// to confirm or dismiss.
pub async fn register(
    State(app): State<AppState>,
    Json(body): Json<RegisterUpdate>,
) -> Json<PendingUpdate> {
    let update = PendingUpdate::new(body.message);
    tracing::info!(id = %update.id, "update notification registered");
    app.updates.lock().await.push(update.clone());
    app.notify();
    Json(update)
}

/// GET /api/updates — pending notifications, oldest first.
pub async fn list(State(app): State<AppState>) -> Json<Vec<PendingUpdate>> {
    Json(app.updates.lock().await.clone())
}

async fn take(app: &AppState, id: Uuid) -> Result<PendingUpdate, AppError> {
    let mut updates = app.updates.lock().await;
    let idx = updates
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| AppError::not_found(format!("no pending update {id}")))?;
    Ok(updates.remove(idx))
}

/// POST /api/updates/{id}/confirm — pull the latest changes and report the
/// captured git output.
pub async fn confirm(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let update = take(&app, id).await?;
    tracing::info!(id = %update.id, "update confirmed, pulling");

    let output = Command::new("git").args(["pull"]).output().await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    app.notify();

    Ok(Json(serde_json::json!({
        "id": update.id,
        "success": output.status.success(),
        "output": format!("{stdout}{stderr}"),
    })))
}

/// POST /api/updates/{id}/dismiss — drop the notification without updating.
pub async fn dismiss(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let update = take(&app, id).await?;
    tracing::info!(id = %update.id, "update dismissed");
    app.notify();
    Ok(Json(serde_json::json!({ "id": update.id, "dismissed": true })))
}
