//! Repository integration tests against a real database:
//! - Full hierarchy creation (project -> symbol/scenario -> children)
//! - Cascade delete behaviour
//! - Unique constraint and foreign key violations
//! - Partial updates and scoped listing

use assert_matches::assert_matches;
use scenaria_core::entities::project::{CreateProject, UpdateProject};
use scenaria_core::entities::scenario::{
    ContextFields, CreateActor, CreateContext, CreateEpisode, CreateRestriction, CreateScenario,
    UpdateScenario,
};
use scenaria_core::entities::symbol::{CreateImpact, CreateSymbol, CreateSynonym};
use scenaria_core::entities::user::NewUser;
use scenaria_core::error::CoreError;
use scenaria_core::repository::{
    ProjectRepository, ScenarioRepository, SymbolRepository, UserRepository,
};
use scenaria_core::types::DbId;
use scenaria_db::repositories::{PgProjectRepo, PgScenarioRepo, PgSymbolRepo, PgUserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
    }
}

fn new_scenario(project_id: DbId, title: &str) -> CreateScenario {
    CreateScenario {
        project_id: Some(project_id),
        title: title.to_string(),
        goal: "Get cash".to_string(),
    }
}

fn new_episode(scenario_id: DbId, position: i32) -> CreateEpisode {
    CreateEpisode {
        scenario_id: Some(scenario_id),
        position: Some(position),
        description: format!("Step {position}"),
        episode_type: "simple".to_string(),
        restriction_id: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_full_hierarchy(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let symbols = PgSymbolRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let symbol = symbols
        .create(&CreateSymbol {
            project_id: Some(project.id),
            name: "customer".into(),
            classification: "subject".into(),
            notion: Some("Bank client".into()),
        })
        .await
        .unwrap();
    symbols
        .create_synonym(&CreateSynonym {
            symbol_id: Some(symbol.id),
            name: "client".into(),
        })
        .await
        .unwrap();
    symbols
        .create_impact(&CreateImpact {
            symbol_id: Some(symbol.id),
            description: "Withdraws cash".into(),
        })
        .await
        .unwrap();
    let scenario = scenarios
        .create(&new_scenario(project.id, "Withdraw money"))
        .await
        .unwrap();
    scenarios.create_episode(&new_episode(scenario.id, 2)).await.unwrap();
    scenarios.create_episode(&new_episode(scenario.id, 1)).await.unwrap();

    let loaded = projects.get(project.id).await.unwrap().unwrap();
    assert_eq!(loaded.symbols.len(), 1);
    assert_eq!(loaded.scenarios.len(), 1);

    let symbol = symbols.get(symbol.id).await.unwrap().unwrap();
    assert_eq!(symbol.synonyms[0].name, "client");
    assert_eq!(symbol.impacts.len(), 1);

    let scenario = scenarios.get(scenario.id).await.unwrap().unwrap();
    let positions: Vec<i32> = scenario.episodes.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_delete(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let scenario = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    let episode = scenarios.create_episode(&new_episode(scenario.id, 1)).await.unwrap();

    projects.delete(project.id).await.unwrap();

    assert!(scenarios.get(scenario.id).await.unwrap().is_none());
    assert_matches!(
        scenarios.delete_episode(episode.id).await,
        Err(CoreError::NotFound { entity: "Episode", .. })
    );
    assert_matches!(
        projects.delete(project.id).await,
        Err(CoreError::NotFound { entity: "Project", .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_parent_is_not_found(pool: PgPool) {
    let symbols = PgSymbolRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let result = symbols
        .create(&CreateSymbol {
            project_id: Some(999_999),
            name: "orphan".into(),
            classification: "object".into(),
            notion: None,
        })
        .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Project", id: 999_999 }));

    let result = scenarios.create_episode(&new_episode(999_999, 1)).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Scenario", .. }));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM symbols")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_episode_position_conflicts(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let scenario = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    scenarios.create_episode(&new_episode(scenario.id, 1)).await.unwrap();

    assert_matches!(
        scenarios.create_episode(&new_episode(scenario.id, 1)).await,
        Err(CoreError::Conflict(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_episode_restriction_from_other_scenario(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let first = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    let second = scenarios.create(&new_scenario(project.id, "Deposit")).await.unwrap();
    let restriction = scenarios
        .create_restriction(&CreateRestriction {
            scenario_id: Some(second.id),
            description: "Valid card".into(),
        })
        .await
        .unwrap();

    let mut input = new_episode(first.id, 1);
    input.restriction_id = Some(restriction.id);
    assert_matches!(
        scenarios.create_episode(&input).await,
        Err(CoreError::NotFound { entity: "Restriction", .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial_and_checks_existence(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects
        .create(&CreateProject {
            name: "ATM".into(),
            description: Some("Cash machine".into()),
        })
        .await
        .unwrap();
    projects
        .update(
            project.id,
            &UpdateProject {
                name: Some("Bank ATM".into()),
                description: None,
            },
        )
        .await
        .unwrap();
    let loaded = projects.get(project.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Bank ATM");
    assert_eq!(loaded.description.as_deref(), Some("Cash machine"));

    assert_matches!(
        projects.update(999_999, &UpdateProject::default()).await,
        Err(CoreError::NotFound { entity: "Project", .. })
    );

    let scenario = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    scenarios
        .update(
            scenario.id,
            &UpdateScenario {
                title: None,
                goal: None,
                context: Some(ContextFields {
                    precondition: Some("Card inserted".into()),
                    ..Default::default()
                }),
            },
        )
        .await
        .unwrap();
    let context = scenarios
        .create_context(&CreateContext {
            scenario_id: Some(scenario.id),
            geographic_location: Some("Branch".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let loaded = scenarios.get(scenario.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Withdraw");
    let stored = loaded.context.unwrap();
    assert_eq!(stored.id, context.id);
    assert_eq!(stored.precondition, None);
    assert_eq!(stored.geographic_location.as_deref(), Some("Branch"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_actor_shared_by_name(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let first = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    let second = scenarios.create(&new_scenario(project.id, "Deposit")).await.unwrap();

    let a = scenarios
        .create_actor(&CreateActor {
            scenario_id: Some(first.id),
            name: "Customer".into(),
        })
        .await
        .unwrap();
    let b = scenarios
        .create_actor(&CreateActor {
            scenario_id: Some(second.id),
            name: "Customer".into(),
        })
        .await
        .unwrap();
    assert_eq!(a.id, b.id);

    scenarios.delete_actor(first.id, a.id).await.unwrap();
    assert_matches!(
        scenarios.delete_actor(first.id, a.id).await,
        Err(CoreError::NotFound { entity: "Actor", .. })
    );
    assert_eq!(scenarios.get(second.id).await.unwrap().unwrap().actors.len(), 1);
}

async fn actor_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM actors")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlinked_actors_are_pruned(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let project = projects.create(&new_project("ATM")).await.unwrap();
    let first = scenarios.create(&new_scenario(project.id, "Withdraw")).await.unwrap();
    let second = scenarios.create(&new_scenario(project.id, "Deposit")).await.unwrap();
    let actor = |scenario_id, name: &str| CreateActor {
        scenario_id: Some(scenario_id),
        name: name.into(),
    };

    let customer = scenarios.create_actor(&actor(first.id, "Customer")).await.unwrap();
    scenarios.create_actor(&actor(first.id, "Teller")).await.unwrap();
    scenarios.create_actor(&actor(second.id, "Teller")).await.unwrap();
    assert_eq!(actor_count(&pool).await, 2);

    // Last link of "Customer" goes away with the unlink.
    scenarios.delete_actor(first.id, customer.id).await.unwrap();
    assert_eq!(actor_count(&pool).await, 1);

    // "Teller" is still linked to the second scenario.
    scenarios.delete(first.id).await.unwrap();
    assert_eq!(actor_count(&pool).await, 1);

    projects.delete(project.id).await.unwrap();
    assert_eq!(actor_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_scoped_to_project(pool: PgPool) {
    let projects = PgProjectRepo::new(pool.clone());
    let scenarios = PgScenarioRepo::new(pool.clone());

    let atm = projects.create(&new_project("ATM")).await.unwrap();
    let shop = projects.create(&new_project("Shop")).await.unwrap();
    scenarios.create(&new_scenario(atm.id, "Withdraw")).await.unwrap();
    scenarios.create(&new_scenario(atm.id, "Deposit")).await.unwrap();

    assert_eq!(scenarios.list(atm.id).await.unwrap().len(), 2);
    assert!(scenarios.list(shop.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email(pool: PgPool) {
    let users = PgUserRepo::new(pool);
    let input = NewUser {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password_hash: "$argon2id$placeholder".into(),
    };
    users.create(&input).await.unwrap();

    assert_matches!(users.create(&input).await, Err(CoreError::EmailInUse(_)));
    assert!(users.find_by_email("ada@example.com").await.unwrap().is_some());
}
