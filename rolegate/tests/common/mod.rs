#![allow(dead_code)]

use axum::http::{header::AUTHORIZATION, HeaderValue};
use axum_test::TestServer;
use config::Config;
use rolegate::api::router::ApiRoutes;
use rolegate::settings::config::Settings;
use rolegate::AppState;
use rolegate_core::api::{LoginResponse, PostView, UserProfile};
use serde_json::json;

pub fn test_settings() -> Settings {
    settings_with(&[])
}

/// Test configuration with individual keys replaced
pub fn settings_with(overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Config::builder().add_source(config::File::with_name("tests/test_config"));
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    let settings: Settings = builder.build().unwrap().try_deserialize().unwrap();
    settings.normalized()
}

/// Router backed by a fresh in-memory store holding the seed accounts:
/// admins `root` and `root2`, moderator `mod` and user `alice`.
pub async fn test_server() -> TestServer {
    server_for(test_settings()).await
}

pub async fn server_for(settings: Settings) -> TestServer {
    let state = AppState::from_settings(settings).await.unwrap();
    TestServer::new(ApiRoutes::create(state)).unwrap()
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> LoginResponse {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<LoginResponse>()
}

pub async fn token_for(server: &TestServer, username: &str) -> String {
    login(server, username, &format!("{username}-password"))
        .await
        .token
}

/// Registers `username` with the password `<username>-password` and logs in
pub async fn register(server: &TestServer, username: &str) -> (UserProfile, String) {
    server
        .post("/api/auth/register")
        .json(&json!({ "username": username, "password": format!("{username}-password") }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let login = login(server, username, &format!("{username}-password")).await;
    (login.user, login.token)
}

pub async fn me(server: &TestServer, token: &str) -> UserProfile {
    let response = server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(token))
        .await;
    response.assert_status_ok();
    response.json::<UserProfile>()
}

pub async fn create_post(server: &TestServer, token: &str, title: &str) -> PostView {
    let response = server
        .post("/api/posts")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "title": title, "content": "some content" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<PostView>()
}

pub async fn promote(server: &TestServer, admin_token: &str, user: &UserProfile) {
    server
        .post(&format!("/api/users/{}/promote", user.id))
        .add_header(AUTHORIZATION, bearer(admin_token))
        .await
        .assert_status_ok();
}

pub fn error_body(message: &str) -> serde_json::Value {
    json!({ "error": message })
}
