use std::sync::Arc;

use scenaria_core::memory::MemoryStore;
use scenaria_core::repository::PasswordHasher;
use scenaria_core::use_cases::{ProjectUseCases, ScenarioUseCases, SymbolUseCases, UserUseCases};
use scenaria_db::repositories::{PgProjectRepo, PgScenarioRepo, PgSymbolRepo, PgUserRepo};
use scenaria_db::DbPool;

use crate::auth::password::Argon2Hasher;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; `None` when running over the in-memory store.
    pub pool: Option<DbPool>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    pub projects: ProjectUseCases,
    pub symbols: SymbolUseCases,
    pub scenarios: ScenarioUseCases,
    pub users: UserUseCases,
}

impl AppState {
    /// Wire the use-cases to the PostgreSQL repositories.
    pub fn with_pool(pool: DbPool, config: ServerConfig) -> Self {
        let symbols = Arc::new(PgSymbolRepo::new(pool.clone()));
        Self {
            projects: ProjectUseCases::new(Arc::new(PgProjectRepo::new(pool.clone()))),
            symbols: SymbolUseCases::new(symbols.clone()),
            scenarios: ScenarioUseCases::new(
                Arc::new(PgScenarioRepo::new(pool.clone())),
                symbols,
            ),
            users: UserUseCases::new(Arc::new(PgUserRepo::new(pool.clone())), hasher()),
            pool: Some(pool),
            config: Arc::new(config),
        }
    }

    /// Wire the use-cases to a fresh in-memory store.
    pub fn in_memory(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            pool: None,
            config: Arc::new(config),
            projects: ProjectUseCases::new(store.clone()),
            symbols: SymbolUseCases::new(store.clone()),
            scenarios: ScenarioUseCases::new(store.clone(), store.clone()),
            users: UserUseCases::new(store, hasher()),
        }
    }
}

fn hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(Argon2Hasher)
}
