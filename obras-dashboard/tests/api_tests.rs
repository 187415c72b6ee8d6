//! Integration tests for obras-dashboard API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use obras_common::db::catalogs::{ensure_crew, ensure_project, named_ids, NamedCatalog};
use obras_common::db::works::insert_work;
use obras_common::db::{init_database, Work};
use obras_dashboard::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: in-memory database with three works
async fn setup_test_db() -> SqlitePool {
    let pool = init_database("sqlite::memory:").await.unwrap();
    ensure_project(&pool, "Norte").await.unwrap();
    ensure_crew(&pool, "C1").await.unwrap();
    let projects = named_ids(&pool, NamedCatalog::Projects).await.unwrap();
    let crews = named_ids(&pool, NamedCatalog::Crews).await.unwrap();

    for (key, work_type) in [("1", "Zanja"), ("2", "Zanja"), ("3", "Presa")] {
        let mut work = Work::new(key);
        work.project_id = Some(projects["Norte"].clone());
        work.crew_id = Some(crews["C1"].clone());
        work.work_type = Some(work_type.to_string());
        insert_work(&pool, &work).await.unwrap();
    }

    pool
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_body(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&extract_body(body).await).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(AppState::new(setup_test_db().await));

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "obras-dashboard");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_project_summary() {
    let app = build_router(AppState::new(setup_test_db().await));

    let response = app.oneshot(test_request("/api/summary/projects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "group_by": "project",
            "rows": [
                { "group": "Norte", "work_type": "Zanja", "total_works": 2 },
                { "group": "Norte", "work_type": "Presa", "total_works": 1 },
            ]
        })
    );
}

#[tokio::test]
async fn test_crew_summary() {
    let app = build_router(AppState::new(setup_test_db().await));

    let response = app.oneshot(test_request("/api/summary/crews")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["group_by"], "crew");
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
    assert_eq!(body["rows"][0]["group"], "C1");
}

#[tokio::test]
async fn test_query_failure_returns_500() {
    // No schema: the summary query hits a missing table
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let app = build_router(AppState::new(pool));

    let response = app.oneshot(test_request("/api/summary/projects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Database error"));
}

#[tokio::test]
async fn test_index_and_script_served() {
    let app = build_router(AppState::new(setup_test_db().await));

    let response = app.clone().oneshot(test_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(extract_body(response.into_body()).await).unwrap();
    assert!(html.contains("/static/app.js"));

    let response = app.oneshot(test_request("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
    let js = String::from_utf8(extract_body(response.into_body()).await).unwrap();
    assert!(js.contains("/api/summary/projects"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_router(AppState::new(setup_test_db().await));

    let response = app.oneshot(test_request("/api/summary/phases")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
