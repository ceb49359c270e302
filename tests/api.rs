use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use r2d2_sqlite::SqliteConnectionManager;
use serde_json::{json, Value};
use tower::ServiceExt;

use guild_war_roster::api::handlers::AppState;
use guild_war_roster::api::routes::create_router;
use guild_war_roster::config::settings::AppConfig;
use guild_war_roster::database::setup;

fn test_router() -> Router {
    let manager = SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder().max_size(1).build(manager).unwrap();

    let mut conn = pool.get().unwrap();
    setup::init_schema(&mut conn).unwrap();
    drop(conn);

    let state = Arc::new(AppState {
        pool,
        config: AppConfig::new(),
    });
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn add_player(router: &Router, name: &str, job: &str) -> i64 {
    let response = send(
        router,
        post_json("/api/players", json!({ "name": name, "job": job })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_created_player_is_retrievable() {
    let router = test_router();

    let id = add_player(&router, "小明", "鐵衣").await;

    let response = send(&router, get(&format!("/api/players/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "小明");
    assert_eq!(body["job"], "鐵衣");
    assert_eq!(body["canFight"], true);
}

#[tokio::test]
async fn test_create_with_unknown_job_is_rejected() {
    let router = test_router();

    let response = send(
        &router,
        post_json("/api/players", json!({ "name": "小明", "job": "戰士" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_dashboard_stats_add_up() {
    let router = test_router();

    add_player(&router, "A", "鐵衣").await;
    let b = add_player(&router, "B", "鐵衣").await;
    add_player(&router, "C", "血河").await;
    send(&router, post_json(&format!("/api/players/{}/toggle", b), json!({}))).await;

    let response = send(&router, get("/api/dashboard")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let stats = body["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 8);

    for entry in stats {
        let total = entry["total"].as_i64().unwrap();
        let on_leave = entry["onLeave"].as_i64().unwrap();
        let available = entry["available"].as_i64().unwrap();
        assert_eq!(available, total - on_leave);
        assert!(available >= 0);
    }

    let iron = stats.iter().find(|s| s["job"] == "鐵衣").unwrap();
    assert_eq!(iron["total"], 2);
    assert_eq!(iron["onLeave"], 1);
    assert_eq!(iron["available"], 1);

    let grouped = body["grouped"].as_array().unwrap();
    assert_eq!(grouped.len(), 8);
    let blood = grouped.iter().find(|g| g["job"] == "血河").unwrap();
    assert_eq!(blood["players"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_batch_add_reports_partial_success() {
    let router = test_router();

    let response = send(
        &router,
        post_json(
            "/api/players/batch",
            json!({ "players": "A,鐵衣\nB,不存在\nC,血河" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["added"], 2);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("第 2 行"));

    let listing = body_json(send(&router, get("/api/players")).await).await;
    let names: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let router = test_router();

    let id = add_player(&router, "A", "碎夢").await;

    let first = body_json(
        send(&router, post_json(&format!("/api/players/{}/toggle", id), json!({}))).await,
    )
    .await;
    assert_eq!(first["canFight"], false);

    let second = body_json(
        send(&router, post_json(&format!("/api/players/{}/toggle", id), json!({}))).await,
    )
    .await;
    assert_eq!(second["canFight"], true);
}

#[tokio::test]
async fn test_toggle_missing_player_is_not_found() {
    let router = test_router();

    let response = send(&router, post_json("/api/players/99/toggle", json!({}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assignment_clears_blank_fields() {
    let router = test_router();

    let id = add_player(&router, "A", "神相").await;

    let response = send(
        &router,
        post_json(
            &format!("/api/players/{}/assignment", id),
            json!({ "groupName": "甲組", "teamName": "", "roleNote": "主坦" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(send(&router, get(&format!("/api/players/{}", id))).await).await;
    assert_eq!(body["groupName"], "甲組");
    assert_eq!(body["teamName"], Value::Null);
    assert_eq!(body["roleNote"], "主坦");
}

#[tokio::test]
async fn test_bulk_assignment_updates_only_that_job() {
    let router = test_router();

    let a = add_player(&router, "A", "九靈").await;
    let b = add_player(&router, "B", "玄機").await;

    let mut assignments = serde_json::Map::new();
    assignments.insert(
        a.to_string(),
        json!({ "groupName": "甲組", "teamName": "一隊" }),
    );
    assignments.insert(b.to_string(), json!({ "groupName": "甲組" }));

    let uri = format!("/api/jobs/{}/assignments", urlencoding::encode("九靈"));
    let response = send(
        &router,
        post_json(&uri, json!({ "assignments": assignments })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["updated"], 1);

    let a_view = body_json(send(&router, get(&format!("/api/players/{}", a))).await).await;
    assert_eq!(a_view["groupName"], "甲組");
    let b_view = body_json(send(&router, get(&format!("/api/players/{}", b))).await).await;
    assert_eq!(b_view["groupName"], Value::Null);
}

#[tokio::test]
async fn test_job_listing_rejects_unknown_job() {
    let router = test_router();

    let uri = format!("/api/jobs/{}", urlencoding::encode("不存在"));
    let response = send(&router, get(&uri)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_removes_player() {
    let router = test_router();

    let id = add_player(&router, "A", "素問").await;

    let response = send(&router, delete(&format!("/api/players/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, get(&format!("/api/players/{}", id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, delete(&format!("/api/players/{}", id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_updates_availability() {
    let router = test_router();

    let id = add_player(&router, "A", "龍吟").await;

    let response = send(
        &router,
        post_json(
            &format!("/api/players/{}", id),
            json!({ "canFight": false, "roleNote": "暫離" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["canFight"], false);
    assert_eq!(body["roleNote"], "暫離");
    assert_eq!(body["name"], "A");
}

#[tokio::test]
async fn test_export_download_headers_and_payload() {
    let router = test_router();

    add_player(&router, "A", "鐵衣").await;

    let response = send(&router, get("/api/export")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename=\"guild_war_roster.xlsx\""));
    assert!(disposition.contains("filename*=UTF-8''"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}
