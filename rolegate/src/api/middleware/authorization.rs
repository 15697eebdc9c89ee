use std::{future::Future, pin::Pin};

use axum::{extract::Request, middleware::Next, response::Response};
use rolegate_core::authorization::{has_any_role, Role};
use tracing::{debug, warn};

use crate::api::{auth_core::CurrentUser, error::AppError};

/// Middleware factory that only lets actors holding one of `roles` through.
///
/// Must run after the session middleware, which attaches [`CurrentUser`].
pub fn require_roles(
    roles: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let Some(user) = req.extensions().get::<CurrentUser>() else {
                warn!("No authenticated user on request to {}", req.uri().path());
                return Err(AppError::Unauthenticated);
            };

            if !has_any_role(&user.actor, roles) {
                warn!(
                    "Access denied: {} ({}) lacks any of {:?} for {} {}",
                    user.profile.username,
                    user.actor.role,
                    roles,
                    req.method(),
                    req.uri().path()
                );
                return Err(AppError::AccessDenied);
            }

            debug!(
                "Role gate passed for {} ({})",
                user.profile.username, user.actor.role
            );
            Ok(next.run(req).await)
        })
    }
}
