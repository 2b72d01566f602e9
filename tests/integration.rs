//! Integration tests: health, signup/authenticate/balance over HTTP.
//!
//! Run with `cargo test`. Most tests use the in-memory directory. The Postgres
//! round trip needs `TEST_DATABASE_URL` (run `migrations/` first) and is
//! skipped otherwise.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ledgerauth::config::Config;
use ledgerauth::db::{self, MemoryAccountDirectory, PgAccountDirectory};
use ledgerauth::{build_state, create_app};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

const SECRET: &str = "test-jwt-secret-min-32-chars!!";

fn memory_app() -> axum::Router {
    let state = build_state(
        &Config::with_secret(SECRET),
        Arc::new(MemoryAccountDirectory::new()),
    )
    .unwrap();
    create_app(state)
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn signup_body(username: &str, password: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "firstName": "Alice",
        "lastName": "Liddell",
        "device": "phone",
        "ipAddress": "10.0.0.1"
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = memory_app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn signup_authenticate_balance() {
    let app = memory_app();

    let (status, body) = post_json(&app, "/api/user/signup", signup_body("alice", "Secr3t!")).await;
    assert_eq!(status, StatusCode::OK, "signup should succeed");
    assert!(body.is_null(), "signup returns an empty body");

    let login = json!({
        "username": "alice",
        "password": "Secr3t!",
        "ipAddress": "10.0.0.2",
        "device": "laptop",
        "browser": "firefox"
    });
    let (status, body) = post_json(&app, "/api/user/authenticate", login).await;
    assert_eq!(status, StatusCode::OK, "authenticate should succeed");
    assert_eq!(body["firstName"], "Alice");
    assert_eq!(body["lastName"], "Liddell");
    let token = body["token"].as_str().expect("response should contain token");
    assert!(!token.is_empty());

    let (status, body) = post_json(&app, "/api/user/balance", json!({ "token": token })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"].as_f64(), Some(5.0));
}

#[tokio::test]
async fn balance_accepts_bearer_header() {
    let app = memory_app();
    post_json(&app, "/api/user/signup", signup_body("bob", "hunter2")).await;
    let (_, body) = post_json(
        &app,
        "/api/user/authenticate",
        json!({ "username": "bob", "password": "hunter2" }),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/user/balance")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from("{}"))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_signup_is_bad_request() {
    let app = memory_app();
    let (status, _) = post_json(&app, "/api/user/signup", signup_body("carol", "pw")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post_json(&app, "/api/user/signup", signup_body("carol", "pw2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn signup_rejects_empty_username() {
    let app = memory_app();
    let (status, _) = post_json(&app, "/api/user/signup", signup_body("", "pw")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let app = memory_app();
    post_json(&app, "/api/user/signup", signup_body("dave", "right")).await;

    let (wrong_status, wrong_body) = post_json(
        &app,
        "/api/user/authenticate",
        json!({ "username": "dave", "password": "wrong" }),
    )
    .await;
    let (missing_status, missing_body) = post_json(
        &app,
        "/api/user/authenticate",
        json!({ "username": "nobody", "password": "wrong" }),
    )
    .await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, missing_body);
}

#[tokio::test]
async fn balance_without_valid_token_is_unauthorized() {
    let app = memory_app();
    let (status, _) = post_json(&app, "/api/user/balance", json!({ "token": "" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = post_json(&app, "/api/user/balance", json!({ "token": "not-a-token" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn postgres_signup_and_login() {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL");
            return;
        }
    };
    let pool = match db::create_pool(&database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            return;
        }
    };
    let state = build_state(
        &Config::with_secret(SECRET),
        Arc::new(PgAccountDirectory::new(pool)),
    )
    .unwrap();
    let app = create_app(state);

    let username = format!(
        "test-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );
    let (status, _) = post_json(&app, "/api/user/signup", signup_body(&username, "password123")).await;
    assert_eq!(status, StatusCode::OK, "signup should succeed");
    let (status, _) = post_json(&app, "/api/user/signup", signup_body(&username, "password123")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "duplicate signup should fail");

    let login = json!({ "username": username, "password": "password123" });
    for _ in 0..2 {
        let (status, body) = post_json(&app, "/api/user/authenticate", login.clone()).await;
        assert_eq!(status, StatusCode::OK, "login should succeed");
        let token = body["token"].as_str().unwrap().to_string();
        let (status, body) = post_json(&app, "/api/user/balance", json!({ "token": token })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"].as_f64(), Some(5.0));
    }
}
