pub mod health;
pub mod project;
pub mod scenario;
pub mod symbol;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /project                                   list, create
/// /project/{id}                              get, update, delete
///
/// /symbol                                    create
/// /symbol/{id}                               get, update, delete
/// /symbol/project/{project_id}               list symbols of a project
/// /symbol/impact                             create impact
/// /symbol/impact/{id}                        delete impact
/// /symbol/synonym                            create synonym
/// /symbol/synonym/{id}                       delete synonym
///
/// /scenario                                  create
/// /scenario/{id}                             get, update, delete
/// /scenario/{id}/with-lexicons               get with matched symbols
/// /scenario/project/{project_id}             list scenarios of a project
/// /scenario/{exception|context|restriction|resource|episode}
///                                            create owned record
/// /scenario/{exception|...|episode}/{id}     delete owned record
/// /scenario/actor, /scenario/group           associate by name
/// /scenario/{scenario_id}/actor/{actor_id}   unlink actor
/// /scenario/{scenario_id}/group/{group_id}   unlink group
///
/// /user                                      register
/// /user/auth                                 authenticate (public)
/// /user/me                                   current user (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/project", project::router())
        .nest("/symbol", symbol::router())
        .nest("/scenario", scenario::router())
        .nest("/user", user::router())
}
