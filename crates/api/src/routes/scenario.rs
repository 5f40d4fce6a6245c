//! Route definitions for the `/scenario` resource.
//!
//! Owned records (exceptions, context, restrictions, resources, episodes)
//! are created with the parent id in the body and deleted by their own id.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::scenario;
use crate::state::AppState;

/// Routes mounted at `/scenario`.
///
/// ```text
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// PATCH  /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/with-lexicons                -> get_with_lexicons
/// GET    /project/{project_id}              -> list_by_project
///
/// POST   /exception    DELETE /exception/{id}
/// POST   /context      DELETE /context/{id}
/// POST   /restriction  DELETE /restriction/{id}
/// POST   /resource     DELETE /resource/{id}
/// POST   /episode      DELETE /episode/{id}
///
/// POST   /actor                             -> create_actor
/// DELETE /{scenario_id}/actor/{actor_id}    -> delete_actor
/// POST   /group                             -> create_group
/// DELETE /{scenario_id}/group/{group_id}    -> delete_group
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(scenario::create))
        .route(
            "/{id}",
            get(scenario::get_by_id)
                .put(scenario::update)
                .patch(scenario::update)
                .delete(scenario::delete),
        )
        .route("/{id}/with-lexicons", get(scenario::get_with_lexicons))
        .route("/project/{project_id}", get(scenario::list_by_project))
        .route("/exception", post(scenario::create_exception))
        .route("/exception/{id}", delete(scenario::delete_exception))
        .route("/context", post(scenario::create_context))
        .route("/context/{id}", delete(scenario::delete_context))
        .route("/restriction", post(scenario::create_restriction))
        .route("/restriction/{id}", delete(scenario::delete_restriction))
        .route("/resource", post(scenario::create_resource))
        .route("/resource/{id}", delete(scenario::delete_resource))
        .route("/episode", post(scenario::create_episode))
        .route("/episode/{id}", delete(scenario::delete_episode))
        .route("/actor", post(scenario::create_actor))
        .route("/{scenario_id}/actor/{actor_id}", delete(scenario::delete_actor))
        .route("/group", post(scenario::create_group))
        .route("/{scenario_id}/group/{group_id}", delete(scenario::delete_group))
}
