//! Shared wiring for use-case tests over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use scenaria_core::entities::project::CreateProject;
use scenaria_core::entities::scenario::CreateScenario;
use scenaria_core::entities::symbol::CreateSymbol;
use scenaria_core::error::CoreError;
use scenaria_core::memory::MemoryStore;
use scenaria_core::repository::PasswordHasher;
use scenaria_core::types::DbId;
use scenaria_core::use_cases::{ProjectUseCases, ScenarioUseCases, SymbolUseCases, UserUseCases};

/// Reversible "hash" so tests can assert the repository never sees plaintext.
pub struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CoreError> {
        Ok(format!("hashed:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError> {
        Ok(hash == format!("hashed:{plaintext}"))
    }
}

pub struct Services {
    pub projects: ProjectUseCases,
    pub symbols: SymbolUseCases,
    pub scenarios: ScenarioUseCases,
    pub users: UserUseCases,
}

pub fn services() -> Services {
    let store = Arc::new(MemoryStore::new());
    Services {
        projects: ProjectUseCases::new(store.clone()),
        symbols: SymbolUseCases::new(store.clone()),
        scenarios: ScenarioUseCases::new(store.clone(), store.clone()),
        users: UserUseCases::new(store, Arc::new(PrefixHasher)),
    }
}

pub async fn project(s: &Services, name: &str) -> DbId {
    s.projects
        .create(&CreateProject {
            name: name.into(),
            description: None,
        })
        .await
        .expect("project create should succeed")
        .id
}

pub async fn symbol(s: &Services, project_id: DbId, name: &str) -> DbId {
    s.symbols
        .create(&CreateSymbol {
            project_id: Some(project_id),
            name: name.into(),
            classification: "object".into(),
            notion: None,
        })
        .await
        .expect("symbol create should succeed")
        .id
}

pub async fn scenario(s: &Services, project_id: DbId, title: &str) -> DbId {
    s.scenarios
        .create(&CreateScenario {
            project_id: Some(project_id),
            title: title.into(),
            goal: "Reach the goal".into(),
        })
        .await
        .expect("scenario create should succeed")
        .id
}
