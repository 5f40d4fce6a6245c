//! Handlers for the `/symbol` resource and its impact/synonym children.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scenaria_core::entities::symbol::{
    CreateImpact, CreateSymbol, CreateSynonym, Impact, Symbol, Synonym, UpdateSymbol,
};
use scenaria_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/symbol/project/{project_id}
///
/// An empty lexicon is reported as 404.
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Symbol>>> {
    let symbols = state.symbols.list(project_id).await?;
    if symbols.is_empty() {
        return Err(AppError::NotFound("There are no symbols".into()));
    }
    Ok(Json(symbols))
}

/// GET /api/symbol/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Symbol>> {
    let symbol = state
        .symbols
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Symbol not found".into()))?;
    Ok(Json(symbol))
}

/// POST /api/symbol
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSymbol>,
) -> AppResult<(StatusCode, Json<Symbol>)> {
    let symbol = state.symbols.create(&input).await?;
    Ok((StatusCode::CREATED, Json(symbol)))
}

/// POST /api/symbol/impact
pub async fn create_impact(
    State(state): State<AppState>,
    Json(input): Json<CreateImpact>,
) -> AppResult<(StatusCode, Json<Impact>)> {
    let impact = state.symbols.create_impact(&input).await?;
    Ok((StatusCode::CREATED, Json(impact)))
}

/// POST /api/symbol/synonym
pub async fn create_synonym(
    State(state): State<AppState>,
    Json(input): Json<CreateSynonym>,
) -> AppResult<(StatusCode, Json<Synonym>)> {
    let synonym = state.symbols.create_synonym(&input).await?;
    Ok((StatusCode::CREATED, Json(synonym)))
}

/// PUT|PATCH /api/symbol/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSymbol>,
) -> AppResult<Json<MessageResponse>> {
    state.symbols.update(id, &input).await?;
    Ok(Json(MessageResponse::new("Symbol updated")))
}

/// DELETE /api/symbol/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.symbols.delete(id).await?;
    Ok(Json(MessageResponse::new("Symbol deleted")))
}

/// DELETE /api/symbol/impact/{id}
pub async fn delete_impact(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.symbols.delete_impact(id).await?;
    Ok(Json(MessageResponse::new("Impact deleted")))
}

/// DELETE /api/symbol/synonym/{id}
pub async fn delete_synonym(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.symbols.delete_synonym(id).await?;
    Ok(Json(MessageResponse::new("Synonym deleted")))
}
