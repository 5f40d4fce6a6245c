//! Project and symbol use-cases over the in-memory store.

mod common;

use assert_matches::assert_matches;
use scenaria_core::entities::project::{CreateProject, UpdateProject};
use scenaria_core::entities::symbol::{CreateImpact, CreateSymbol, CreateSynonym, UpdateSymbol};
use scenaria_core::error::CoreError;

use common::{project, scenario, services, symbol};

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_project_requires_name() {
    let s = services();
    let result = s
        .projects
        .create(&CreateProject {
            name: String::new(),
            description: Some("no name".into()),
        })
        .await;
    assert_matches!(result, Err(CoreError::MissingParam(msg)) if msg == "name should not be empty");
    assert!(s.projects.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_project_loads_symbols_and_scenarios() {
    let s = services();
    let id = project(&s, "ATM").await;
    symbol(&s, id, "customer").await;
    scenario(&s, id, "Withdraw money").await;

    let loaded = s.projects.get(id).await.unwrap().expect("project exists");
    assert_eq!(loaded.name, "ATM");
    assert_eq!(loaded.symbols.len(), 1);
    assert_eq!(loaded.scenarios.len(), 1);
}

#[tokio::test]
async fn get_missing_project_is_none() {
    let s = services();
    assert!(s.projects.get(999).await.unwrap().is_none());
}

#[tokio::test]
async fn update_project_merges_supplied_fields() {
    let s = services();
    let id = project(&s, "ATM").await;

    s.projects
        .update(
            id,
            &UpdateProject {
                name: None,
                description: Some("Cash machine".into()),
            },
        )
        .await
        .unwrap();

    let loaded = s.projects.get(id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "ATM");
    assert_eq!(loaded.description.as_deref(), Some("Cash machine"));
}

#[tokio::test]
async fn update_missing_project_does_not_exist() {
    let s = services();
    let result = s.projects.update(42, &UpdateProject::default()).await;
    assert_matches!(result, Err(CoreError::InvalidParam(msg)) if msg == "This project does not exist");
}

#[tokio::test]
async fn delete_project_cascades_to_children() {
    let s = services();
    let id = project(&s, "ATM").await;
    let symbol_id = symbol(&s, id, "customer").await;
    let scenario_id = scenario(&s, id, "Withdraw money").await;

    s.projects.delete(id).await.unwrap();

    assert!(s.projects.get(id).await.unwrap().is_none());
    assert!(s.symbols.get(symbol_id).await.unwrap().is_none());
    assert!(s.scenarios.get(scenario_id).await.unwrap().is_none());
    assert_matches!(
        s.projects.delete(id).await,
        Err(CoreError::InvalidParam(msg)) if msg == "This project does not exist"
    );
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_symbol_for_missing_project_is_not_found() {
    let s = services();
    let result = s
        .symbols
        .create(&CreateSymbol {
            project_id: Some(77),
            name: "customer".into(),
            classification: "subject".into(),
            notion: None,
        })
        .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Project", id: 77 }));
}

#[tokio::test]
async fn create_symbol_without_project_id_is_missing_param() {
    let s = services();
    let result = s
        .symbols
        .create(&CreateSymbol {
            project_id: None,
            name: "customer".into(),
            classification: "subject".into(),
            notion: None,
        })
        .await;
    assert_matches!(result, Err(CoreError::MissingParam(msg)) if msg.contains("project_id"));
}

#[tokio::test]
async fn list_symbols_is_scoped_to_project() {
    let s = services();
    let atm = project(&s, "ATM").await;
    let shop = project(&s, "Shop").await;
    symbol(&s, atm, "customer").await;
    symbol(&s, atm, "card").await;
    symbol(&s, shop, "cart").await;

    assert_eq!(s.symbols.list(atm).await.unwrap().len(), 2);
    assert_eq!(s.symbols.list(shop).await.unwrap().len(), 1);
    assert!(s.symbols.list(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn synonyms_and_impacts_load_with_symbol() {
    let s = services();
    let pid = project(&s, "ATM").await;
    let sid = symbol(&s, pid, "customer").await;

    s.symbols
        .create_synonym(&CreateSynonym {
            symbol_id: Some(sid),
            name: "client".into(),
        })
        .await
        .unwrap();
    let impact = s
        .symbols
        .create_impact(&CreateImpact {
            symbol_id: Some(sid),
            description: "Withdraws cash".into(),
        })
        .await
        .unwrap();

    let loaded = s.symbols.get(sid).await.unwrap().unwrap();
    assert_eq!(loaded.synonyms[0].name, "client");
    assert_eq!(loaded.impacts[0].id, impact.id);

    s.symbols.delete_impact(impact.id).await.unwrap();
    assert!(s.symbols.get(sid).await.unwrap().unwrap().impacts.is_empty());
    assert_matches!(
        s.symbols.delete_impact(impact.id).await,
        Err(CoreError::NotFound { entity: "Impact", .. })
    );
}

#[tokio::test]
async fn synonym_for_missing_symbol_is_not_found() {
    let s = services();
    let result = s
        .symbols
        .create_synonym(&CreateSynonym {
            symbol_id: Some(5),
            name: "client".into(),
        })
        .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Symbol", id: 5 }));
}

#[tokio::test]
async fn update_and_delete_missing_symbol_does_not_exist() {
    let s = services();
    let update = s
        .symbols
        .update(
            3,
            &UpdateSymbol {
                name: Some("renamed".into()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(update, Err(CoreError::InvalidParam(msg)) if msg == "This symbol does not exist");
    assert_matches!(
        s.symbols.delete(3).await,
        Err(CoreError::InvalidParam(msg)) if msg == "This symbol does not exist"
    );
}

#[tokio::test]
async fn update_symbol_rejects_empty_name() {
    let s = services();
    let pid = project(&s, "ATM").await;
    let sid = symbol(&s, pid, "customer").await;

    let result = s
        .symbols
        .update(
            sid,
            &UpdateSymbol {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(CoreError::MissingParam(_)));
    assert_eq!(s.symbols.get(sid).await.unwrap().unwrap().name, "customer");
}
