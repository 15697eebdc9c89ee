use rolegate_core::api::UserProfile;
use rolegate_core::authorization::Actor;
use tracing::debug;

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

/// The authenticated identity attached to a request
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub actor: Actor,
    pub profile: UserProfile,
}

/// Resolve a session token to the user it was issued for.
///
/// The user is reloaded from the store, so a token for a deleted account is
/// rejected and the role is always the current one.
pub async fn authenticate_user_from_token(
    state: &SharedAppState,
    token: &str,
) -> Result<CurrentUser, AppError> {
    let user_id = state.sessions.verify(token).map_err(|e| {
        debug!("Rejected session token: {}", e);
        AppError::Unauthenticated
    })?;

    let user = state.store.find_user(user_id).await.ok_or_else(|| {
        debug!("Session token refers to unknown user {}", user_id);
        AppError::Unauthenticated
    })?;

    Ok(CurrentUser {
        actor: user.actor(),
        profile: user.profile(),
    })
}
