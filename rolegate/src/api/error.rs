use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use rolegate_core::api::ErrorBody;
use rolegate_core::authorization::DenyReason;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Clone, Error, Debug)]
pub enum AppError {
    #[error("Please authenticate.")]
    Unauthenticated,

    /// The route requires a role the actor does not have
    #[error("Access denied.")]
    AccessDenied,

    /// The decision model denied the action
    #[error("{0}")]
    Forbidden(DenyReason),

    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("The target was modified concurrently, please retry")]
    Conflict,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn get_error_msg(&self) -> (StatusCode, String) {
        let status = match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Forbidden(reason) if reason.is_conflict() => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::PostNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_)
            | AppError::UsernameTaken
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(app_error) = e.downcast_ref::<AppError>() {
            return app_error.clone();
        }
        AppError::InternalServerError(e.to_string())
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> Self {
        AppError::Forbidden(reason)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UserNotFound(_) => AppError::UserNotFound,
            StoreError::PostNotFound(_) => AppError::PostNotFound,
            StoreError::UsernameTaken(_) => AppError::UsernameTaken,
            StoreError::StaleTarget(_) => AppError::Conflict,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.get_error_msg();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
