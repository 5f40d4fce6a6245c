//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /        -> create        (public)
/// POST   /auth    -> authenticate  (public)
/// GET    /me      -> me            (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/auth", post(user::authenticate))
        .route("/me", get(user::me))
}
