use axum::{debug_handler, response::IntoResponse, Json};

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
    (status = 200, description = "Service is up")
    )
)]
#[debug_handler]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
