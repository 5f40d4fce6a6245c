use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// `"postgres"` or `"memory"`.
    storage: &'static str,
    /// Database reachability; `null` for the in-memory store.
    db_healthy: Option<bool>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (storage, db_healthy) = match &state.pool {
        Some(pool) => {
            let healthy = scenaria_db::health_check(pool).await.is_ok();
            ("postgres", Some(healthy))
        }
        None => ("memory", None),
    };

    Json(HealthResponse {
        status: if db_healthy == Some(false) { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        storage,
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
