//! Handlers for the `/user` resource (registration, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scenaria_core::entities::user::{AuthenticateUser, CreateUser, UserResponse};
use serde::Serialize;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/user
///
/// Register a new user. The response never carries the password hash.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.create(&input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/user/auth
///
/// Authenticate with email + password and receive an access token.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(input): Json<AuthenticateUser>,
) -> AppResult<Json<AuthResponse>> {
    let user = state.users.authenticate(&input).await?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(user_id = user.id, "User authenticated");

    Ok(Json(AuthResponse {
        user: user.into(),
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
    }))
}

/// GET /api/user/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .get(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}
