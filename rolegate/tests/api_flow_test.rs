mod common;

use axum::http::{
    header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    HeaderValue, StatusCode,
};
use common::*;
use rolegate_core::api::PostView;
use rolegate_core::authorization::Role;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let server = test_server().await;
    let response = server.get("/api/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}

#[tokio::test]
async fn test_register_always_creates_plain_user() {
    let server = test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "mallory", "password": "secret", "role": "admin" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "message": "User registered successfully" }));

    let login = login(&server, "mallory", "secret").await;
    assert_eq!(login.user.role, Role::User);
    assert_eq!(login.message, "Logged in successfully");
}

#[tokio::test]
async fn test_register_rejects_duplicate_and_empty_fields() {
    let server = test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "alice", "password": "another" }))
        .await;
    response.assert_status_bad_request();
    response.assert_json(&error_body("Username already taken"));

    server
        .post("/api/auth/register")
        .json(&json!({ "username": "  ", "password": "pw" }))
        .await
        .assert_status_bad_request();

    server
        .post("/api/auth/register")
        .json(&json!({ "username": "nopass", "password": "" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let server = test_server().await;

    for (username, password) in [("alice", "wrong"), ("nobody", "alice-password")] {
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&error_body("Invalid login credentials"));
    }
}

#[tokio::test]
async fn test_login_sets_http_only_session_cookie() {
    let server = test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "alice-password" }))
        .await;
    response.assert_status_ok();

    let cookie = response.header(SET_COOKIE);
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("token="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");

    // The cookie alone authenticates
    let pair = cookie.split(';').next().unwrap();
    let response = server
        .get("/api/auth/me")
        .add_header(COOKIE, HeaderValue::from_str(pair).unwrap())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["username"], "alice");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = test_server().await;

    let response = server.post("/api/auth/logout").await;
    response.assert_status_ok();
    let cookie = response.header(SET_COOKIE);
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("token=;"), "{cookie}");
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
}

#[tokio::test]
async fn test_missing_or_invalid_session_is_rejected() {
    let server = test_server().await;

    let response = server.get("/api/posts").await;
    response.assert_status_unauthorized();
    response.assert_json(&error_body("Please authenticate."));

    let response = server
        .get("/api/posts")
        .add_header(AUTHORIZATION, bearer("not-a-jwt"))
        .await;
    response.assert_status_unauthorized();
    response.assert_json(&error_body("Please authenticate."));
}

#[tokio::test]
async fn test_session_of_deleted_user_stops_working() {
    let server = test_server().await;
    let (bob, bob_token) = register(&server, "bob").await;
    let root = token_for(&server, "root").await;

    server
        .delete(&format!("/api/users/{}", bob.id))
        .add_header(AUTHORIZATION, bearer(&root))
        .await
        .assert_status_ok();

    server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&bob_token))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_and_list_posts() {
    let server = test_server().await;
    let alice = token_for(&server, "alice").await;

    let post = create_post(&server, &alice, "Hello").await;
    assert_eq!(post.title, "Hello");
    assert_eq!(post.author.username, "alice");
    assert_eq!(post.author.role, Role::User);

    let response = server
        .get("/api/posts")
        .add_header(AUTHORIZATION, bearer(&alice))
        .await;
    response.assert_status_ok();
    let posts = response.json::<Vec<PostView>>();
    assert_eq!(posts, vec![post]);
}

#[tokio::test]
async fn test_create_post_requires_title() {
    let server = test_server().await;
    let alice = token_for(&server, "alice").await;

    server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(&alice))
        .json(&json!({ "title": "", "content": "body" }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = test_server().await;
    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc = response.json::<serde_json::Value>();
    assert!(doc["paths"]["/api/users/{id}/promote"].is_object());
}

#[tokio::test]
async fn test_custom_cookie_name_is_used_everywhere() {
    let server = server_for(settings_with(&[("api.cookie_name", "session")])).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "alice-password" }))
        .await;
    let cookie = response.header(SET_COOKIE);
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("session="), "{cookie}");

    let pair = cookie.split(';').next().unwrap();
    server
        .get("/api/auth/me")
        .add_header(COOKIE, HeaderValue::from_str(pair).unwrap())
        .await
        .assert_status_ok();

    let doc = server.get("/api-docs/openapi.json").await.json::<serde_json::Value>();
    assert_eq!(
        doc["components"]["securitySchemes"]["cookieAuth"]["name"],
        "session"
    );
}
