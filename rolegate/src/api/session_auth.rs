use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::api::auth_core::authenticate_user_from_token;
use crate::api::error::AppError;
use crate::app_state::SharedAppState;

pub use crate::api::auth_core::CurrentUser;

/// Rejects requests without a valid session and attaches [`CurrentUser`] to
/// the request extensions otherwise.
pub async fn auth(
    State(state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = state.sessions.token_from_headers(req.headers()) else {
        warn!(
            "Missing session token | {} {} | user_agent: {:?}",
            req.method(),
            req.uri(),
            req.headers()
                .get(http::header::USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("unknown")
        );
        return Err(AppError::Unauthenticated);
    };

    match authenticate_user_from_token(&state, &token).await {
        Ok(user) => {
            debug!(
                "User authenticated: {} ({})",
                user.profile.username, user.actor.role
            );
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(
                "Authentication failed for {} {}",
                req.method(),
                req.uri()
            );
            Err(e)
        }
    }
}
