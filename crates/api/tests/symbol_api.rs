//! HTTP-level integration tests for `/api/symbol`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post_json, put_json};
use serde_json::json;

async fn project(app: &axum::Router) -> i64 {
    create(app, "/api/project", json!({ "name": "ATM" })).await
}

#[tokio::test]
async fn list_by_project_reports_empty_as_404() {
    let app = common::build_test_app();
    let project_id = project(&app).await;

    let response = get(&app, &format!("/api/symbol/project/{project_id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "There are no symbols");
}

#[tokio::test]
async fn list_by_project_is_scoped_to_the_project() {
    let app = common::build_test_app();
    let atm = project(&app).await;
    let other = project(&app).await;
    create(
        &app,
        "/api/symbol",
        json!({ "project_id": atm, "name": "card", "classification": "object" }),
    )
    .await;
    create(
        &app,
        "/api/symbol",
        json!({ "project_id": other, "name": "ticket", "classification": "object" }),
    )
    .await;

    let json = body_json(get(&app, &format!("/api/symbol/project/{atm}")).await).await;

    let symbols = json.as_array().unwrap();
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0]["name"], "card");
}

#[tokio::test]
async fn create_for_missing_project_returns_404() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/symbol",
        json!({ "project_id": 404, "name": "card", "classification": "object" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project with id 404 not found");
}

#[tokio::test]
async fn create_without_project_id_is_a_missing_param() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/symbol",
        json!({ "name": "card", "classification": "object" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_PARAM");
}

#[tokio::test]
async fn impacts_and_synonyms_are_returned_with_the_symbol() {
    let app = common::build_test_app();
    let project_id = project(&app).await;
    let symbol_id = create(
        &app,
        "/api/symbol",
        json!({ "project_id": project_id, "name": "customer", "classification": "subject" }),
    )
    .await;
    let impact_id = create(
        &app,
        "/api/symbol/impact",
        json!({ "symbol_id": symbol_id, "description": "Withdraws cash" }),
    )
    .await;
    create(
        &app,
        "/api/symbol/synonym",
        json!({ "symbol_id": symbol_id, "name": "client" }),
    )
    .await;

    let json = body_json(get(&app, &format!("/api/symbol/{symbol_id}")).await).await;
    assert_eq!(json["impacts"][0]["description"], "Withdraws cash");
    assert_eq!(json["synonyms"][0]["name"], "client");

    let response = delete(&app, &format!("/api/symbol/impact/{impact_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Impact deleted");

    let json = body_json(get(&app, &format!("/api/symbol/{symbol_id}")).await).await;
    assert_eq!(json["impacts"], json!([]));
}

#[tokio::test]
async fn synonym_for_missing_symbol_returns_404() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        "/api/symbol/synonym",
        json!({ "symbol_id": 12, "name": "client" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_then_delete_symbol() {
    let app = common::build_test_app();
    let project_id = project(&app).await;
    let symbol_id = create(
        &app,
        "/api/symbol",
        json!({ "project_id": project_id, "name": "card", "classification": "object" }),
    )
    .await;

    let response = put_json(
        &app,
        &format!("/api/symbol/{symbol_id}"),
        json!({ "notion": "Plastic card issued by the bank" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Symbol updated");

    let json = body_json(get(&app, &format!("/api/symbol/{symbol_id}")).await).await;
    assert_eq!(json["name"], "card");
    assert_eq!(json["notion"], "Plastic card issued by the bank");

    let response = delete(&app, &format!("/api/symbol/{symbol_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Symbol deleted");

    let response = get(&app, &format!("/api/symbol/{symbol_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Symbol not found");
}

#[tokio::test]
async fn delete_missing_symbol_is_a_bad_request() {
    let app = common::build_test_app();

    let response = delete(&app, "/api/symbol/31").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "This symbol does not exist");
}
