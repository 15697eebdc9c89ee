use axum::{
    debug_handler,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use rolegate_core::api::{
    ErrorBody, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserProfile,
};
use rolegate_core::authorization::Role;
use tracing::{debug, info};

use crate::api::{auth_core::CurrentUser, error::AppError};
use crate::app_state::SharedAppState;
use crate::store::NewUser;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
    (status = 201, description = "User registered", body = MessageResponse),
    (status = 400, description = "Missing fields or username already taken", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn register_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput("username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::InvalidInput("password must not be empty".into()));
    }

    let password_hash = state.passwords.hash(&payload.password).await?;
    let user = state
        .store
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            role: Role::User,
        })
        .await?;

    info!("Registered user '{}' ({})", user.username, user.id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
    (status = 200, description = "Session cookie set and token returned", body = LoginResponse),
    (status = 400, description = "Invalid login credentials", body = ErrorBody),
    )
)]
#[debug_handler]
pub async fn login_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Some(user) = state.store.find_user_by_username(payload.username.trim()).await else {
        debug!("Login attempt for unknown user '{}'", payload.username);
        return Err(AppError::InvalidCredentials);
    };

    if !state
        .passwords
        .verify(&payload.password, &user.password_hash)
        .await
    {
        debug!("Wrong password for user '{}'", user.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .sessions
        .issue(user.id)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let cookie = state.sessions.session_cookie(&token);

    info!("User '{}' logged in", user.username);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Logged in successfully".into(),
            user: user.profile(),
            token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
    (status = 200, description = "Session cookie cleared", body = MessageResponse),
    )
)]
#[debug_handler]
pub async fn logout_handler(State(state): State<SharedAppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.sessions.cleared_cookie())],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
    (status = 200, description = "The authenticated user", body = UserProfile),
    (status = 401, description = "Please authenticate.", body = ErrorBody),
    ),
    security(
        ("bearerAuth" = []),
        ("cookieAuth" = [])
    )
)]
#[debug_handler]
pub async fn me_handler(Extension(user): Extension<CurrentUser>) -> Json<UserProfile> {
    Json(user.profile)
}
