//! Handlers for the `/project` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scenaria_core::entities::project::{CreateProject, Project, UpdateProject};
use scenaria_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/project
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/project
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.projects.list().await?;
    Ok(Json(projects))
}

/// GET /api/project/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state
        .projects
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
    Ok(Json(project))
}

/// PUT|PATCH /api/project/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<MessageResponse>> {
    state.projects.update(id, &input).await?;
    Ok(Json(MessageResponse::new("Project updated")))
}

/// DELETE /api/project/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.projects.delete(id).await?;
    Ok(Json(MessageResponse::new("Project deleted")))
}
