//! Route definitions for the `/symbol` resource and its impacts/synonyms.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::symbol;
use crate::state::AppState;

/// Routes mounted at `/symbol`.
///
/// ```text
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /project/{project_id}      -> list_by_project
///
/// POST   /impact                    -> create_impact
/// DELETE /impact/{id}               -> delete_impact
/// POST   /synonym                   -> create_synonym
/// DELETE /synonym/{id}              -> delete_synonym
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(symbol::create))
        .route(
            "/{id}",
            get(symbol::get_by_id)
                .put(symbol::update)
                .patch(symbol::update)
                .delete(symbol::delete),
        )
        .route("/project/{project_id}", get(symbol::list_by_project))
        .route("/impact", post(symbol::create_impact))
        .route("/impact/{id}", delete(symbol::delete_impact))
        .route("/synonym", post(symbol::create_synonym))
        .route("/synonym/{id}", delete(symbol::delete_synonym))
}
