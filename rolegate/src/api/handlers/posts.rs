use axum::{
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use rolegate_core::api::{CreatePostRequest, ErrorBody, MessageResponse, PostView};
use tracing::info;

use super::parse_id;
use crate::api::{auth_core::CurrentUser, error::AppError};
use crate::app_state::SharedAppState;
use crate::store::StoreError;

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
    (status = 201, description = "Post created", body = PostView),
    (status = 400, description = "Title missing", body = ErrorBody),
    (status = 401, description = "Please authenticate.", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn create_post_handler(
    State(state): State<SharedAppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".into()));
    }

    // The account may have been deleted since the session was checked
    let post = state
        .store
        .create_post(current.actor.id, title.to_string(), payload.content)
        .await
        .map_err(|e| match e {
            StoreError::UserNotFound(_) => AppError::Unauthenticated,
            other => other.into(),
        })?;

    info!("User '{}' created post {}", current.profile.username, post.id);
    Ok((
        StatusCode::CREATED,
        Json(post.view(current.profile.as_author())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
    (status = 200, description = "All posts with their authors", body = Vec<PostView>),
    (status = 401, description = "Please authenticate.", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn list_posts_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.store.list_posts().await))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(
        ("id" = String, Path, description = "Id of the post to delete")
    ),
    responses(
    (status = 200, description = "Post deleted", body = MessageResponse),
    (status = 403, description = "not authorized to delete this post", body = ErrorBody),
    (status = 404, description = "Post not found", body = ErrorBody),
    (status = 409, description = "Author changed role while the request was running", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn delete_post_handler(
    State(state): State<SharedAppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, AppError::PostNotFound)?;
    let post = state
        .store
        .find_post(id)
        .await
        .ok_or(AppError::PostNotFound)?;

    state
        .auth_service
        .check_delete_post(&current.actor, &post)?;
    state.store.delete_post(post).await?;

    info!(
        "User '{}' deleted post {} by {}",
        current.profile.username, post.id, post.author.id
    );
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}
