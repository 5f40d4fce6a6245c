//! Handlers for the `/scenario` resource and the records a scenario owns.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scenaria_core::entities::scenario::{
    Actor, Context, CreateActor, CreateContext, CreateEpisode, CreateException, CreateGroup,
    CreateResource, CreateRestriction, CreateScenario, Episode, Exception, Group, Resource,
    Restriction, Scenario, ScenarioWithLexicons, UpdateScenario,
};
use scenaria_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

fn scenario_not_found() -> AppError {
    AppError::NotFound("Scenario not found".into())
}

fn deleted(what: &str) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("{what} deleted")))
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// GET /api/scenario/project/{project_id}
///
/// A project without scenarios is reported as 404.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Scenario>>> {
    let scenarios = state.scenarios.list(project_id).await?;
    if scenarios.is_empty() {
        return Err(AppError::NotFound("There are no scenarios".into()));
    }
    Ok(Json(scenarios))
}

/// GET /api/scenario/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Scenario>> {
    let scenario = state.scenarios.get(id).await?.ok_or_else(scenario_not_found)?;
    Ok(Json(scenario))
}

/// GET /api/scenario/{id}/with-lexicons
pub async fn get_with_lexicons(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScenarioWithLexicons>> {
    let result = state
        .scenarios
        .get_with_lexicons(id)
        .await?
        .ok_or_else(scenario_not_found)?;
    Ok(Json(result))
}

/// POST /api/scenario
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScenario>,
) -> AppResult<(StatusCode, Json<Scenario>)> {
    let scenario = state.scenarios.create(&input).await?;
    Ok((StatusCode::CREATED, Json(scenario)))
}

/// PUT|PATCH /api/scenario/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScenario>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.update(id, &input).await?;
    Ok(Json(MessageResponse::new("Scenario updated")))
}

/// DELETE /api/scenario/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete(id).await?;
    Ok(deleted("Scenario"))
}

// ---------------------------------------------------------------------------
// Owned records
// ---------------------------------------------------------------------------

/// POST /api/scenario/exception
pub async fn create_exception(
    State(state): State<AppState>,
    Json(input): Json<CreateException>,
) -> AppResult<(StatusCode, Json<Exception>)> {
    let exception = state.scenarios.create_exception(&input).await?;
    Ok((StatusCode::CREATED, Json(exception)))
}

/// DELETE /api/scenario/exception/{id}
pub async fn delete_exception(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_exception(id).await?;
    Ok(deleted("Exception"))
}

/// POST /api/scenario/context
///
/// Replaces the scenario's context when it already has one.
pub async fn create_context(
    State(state): State<AppState>,
    Json(input): Json<CreateContext>,
) -> AppResult<(StatusCode, Json<Context>)> {
    let context = state.scenarios.create_context(&input).await?;
    Ok((StatusCode::CREATED, Json(context)))
}

/// DELETE /api/scenario/context/{id}
pub async fn delete_context(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_context(id).await?;
    Ok(deleted("Context"))
}

/// POST /api/scenario/restriction
pub async fn create_restriction(
    State(state): State<AppState>,
    Json(input): Json<CreateRestriction>,
) -> AppResult<(StatusCode, Json<Restriction>)> {
    let restriction = state.scenarios.create_restriction(&input).await?;
    Ok((StatusCode::CREATED, Json(restriction)))
}

/// DELETE /api/scenario/restriction/{id}
pub async fn delete_restriction(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_restriction(id).await?;
    Ok(deleted("Restriction"))
}

/// POST /api/scenario/resource
pub async fn create_resource(
    State(state): State<AppState>,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    let resource = state.scenarios.create_resource(&input).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// DELETE /api/scenario/resource/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_resource(id).await?;
    Ok(deleted("Resource"))
}

/// POST /api/scenario/episode
pub async fn create_episode(
    State(state): State<AppState>,
    Json(input): Json<CreateEpisode>,
) -> AppResult<(StatusCode, Json<Episode>)> {
    let episode = state.scenarios.create_episode(&input).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

/// DELETE /api/scenario/episode/{id}
pub async fn delete_episode(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_episode(id).await?;
    Ok(deleted("Episode"))
}

// ---------------------------------------------------------------------------
// Associations
// ---------------------------------------------------------------------------

/// POST /api/scenario/actor
pub async fn create_actor(
    State(state): State<AppState>,
    Json(input): Json<CreateActor>,
) -> AppResult<(StatusCode, Json<Actor>)> {
    let actor = state.scenarios.create_actor(&input).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

/// DELETE /api/scenario/{scenario_id}/actor/{actor_id}
pub async fn delete_actor(
    State(state): State<AppState>,
    Path((scenario_id, actor_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_actor(scenario_id, actor_id).await?;
    Ok(deleted("Actor"))
}

/// POST /api/scenario/group
pub async fn create_group(
    State(state): State<AppState>,
    Json(input): Json<CreateGroup>,
) -> AppResult<(StatusCode, Json<Group>)> {
    let group = state.scenarios.create_group(&input).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// DELETE /api/scenario/{scenario_id}/group/{group_id}
pub async fn delete_group(
    State(state): State<AppState>,
    Path((scenario_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    state.scenarios.delete_group(scenario_id, group_id).await?;
    Ok(deleted("Group"))
}
