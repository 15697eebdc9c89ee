use axum::{
    debug_handler,
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use rolegate_core::api::{DeleteUserResponse, ErrorBody, RoleChangeResponse, UserProfile};
use tracing::info;

use super::parse_id;
use crate::api::{auth_core::CurrentUser, error::AppError};
use crate::app_state::SharedAppState;
use crate::store::UserRecord;

async fn load_target(state: &SharedAppState, raw_id: &str) -> Result<UserRecord, AppError> {
    let id = parse_id(raw_id, AppError::UserNotFound)?;
    state
        .store
        .find_user(id)
        .await
        .ok_or(AppError::UserNotFound)
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
    (status = 200, description = "All registered users", body = Vec<UserProfile>),
    (status = 401, description = "Please authenticate.", body = ErrorBody),
    (status = 403, description = "Access denied.", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn list_users_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    let users: Vec<UserProfile> = state
        .store
        .list_users()
        .await
        .iter()
        .map(UserRecord::profile)
        .collect();
    Ok(Json(users))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "Id of the user to delete")
    ),
    responses(
    (status = 200, description = "User and their posts deleted", body = DeleteUserResponse),
    (status = 403, description = "Denied by the role rules", body = ErrorBody),
    (status = 404, description = "User not found", body = ErrorBody),
    (status = 409, description = "Target changed role while the request was running", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn delete_user_handler(
    State(state): State<SharedAppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = load_target(&state, &id).await?;
    state
        .auth_service
        .check_delete_user(&current.actor, &target.actor())?;

    let deleted_posts = state.store.delete_user_cascade(target.actor()).await?;
    info!(
        "User '{}' deleted '{}' and {} of their posts",
        current.profile.username, target.username, deleted_posts
    );

    Ok(Json(DeleteUserResponse {
        message: "User and their posts deleted successfully".into(),
        deleted_posts,
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/promote",
    params(
        ("id" = String, Path, description = "Id of the user to promote")
    ),
    responses(
    (status = 200, description = "User promoted to moderator", body = RoleChangeResponse),
    (status = 400, description = "User is already an admin or moderator", body = ErrorBody),
    (status = 403, description = "Access denied.", body = ErrorBody),
    (status = 404, description = "User not found", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn promote_user_handler(
    State(state): State<SharedAppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = load_target(&state, &id).await?;
    let change = state
        .auth_service
        .approve_promotion(&current.actor, &target.actor())?;
    let updated = state.store.apply_role_change(change).await?;

    info!(
        "User '{}' promoted '{}' to {}",
        current.profile.username, updated.username, updated.role
    );
    Ok(Json(RoleChangeResponse {
        message: "User promoted to moderator successfully".into(),
        user: updated.profile(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/demote",
    params(
        ("id" = String, Path, description = "Id of the moderator to demote")
    ),
    responses(
    (status = 200, description = "Moderator demoted to user", body = RoleChangeResponse),
    (status = 400, description = "User is already a regular user", body = ErrorBody),
    (status = 403, description = "Admins cannot be demoted", body = ErrorBody),
    (status = 404, description = "User not found", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn demote_user_handler(
    State(state): State<SharedAppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = load_target(&state, &id).await?;
    let change = state
        .auth_service
        .approve_demotion(&current.actor, &target.actor())?;
    let updated = state.store.apply_role_change(change).await?;

    info!(
        "User '{}' demoted '{}' to {}",
        current.profile.username, updated.username, updated.role
    );
    Ok(Json(RoleChangeResponse {
        message: "Moderator demoted to user successfully".into(),
        user: updated.profile(),
    }))
}
