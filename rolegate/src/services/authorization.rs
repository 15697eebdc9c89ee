use rolegate_core::authorization::{
    can_delete_post, can_delete_user, demote, promote, Action, Actor, Decision, DenyReason,
    PostTarget, RoleChange,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Runs the decision model and records every outcome in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationService;

impl AuthorizationService {
    pub fn check_delete_post(&self, actor: &Actor, post: &PostTarget) -> Result<(), DenyReason> {
        Self::record(
            Action::DeletePost,
            actor,
            post.id,
            can_delete_post(actor, post),
        )
    }

    pub fn check_delete_user(&self, actor: &Actor, target: &Actor) -> Result<(), DenyReason> {
        Self::record(
            Action::DeleteUser,
            actor,
            target.id,
            can_delete_user(actor, target),
        )
    }

    pub fn approve_promotion(&self, actor: &Actor, target: &Actor) -> Result<RoleChange, DenyReason> {
        let change = promote(actor, target);
        Self::record(Action::Promote, actor, target.id, Self::as_decision(&change))?;
        change
    }

    pub fn approve_demotion(&self, actor: &Actor, target: &Actor) -> Result<RoleChange, DenyReason> {
        let change = demote(actor, target);
        Self::record(Action::Demote, actor, target.id, Self::as_decision(&change))?;
        change
    }

    fn as_decision(change: &Result<RoleChange, DenyReason>) -> Decision {
        match change {
            Ok(_) => Decision::Allow,
            Err(reason) => Decision::Deny(*reason),
        }
    }

    fn record(
        action: Action,
        actor: &Actor,
        target: Uuid,
        decision: Decision,
    ) -> Result<(), DenyReason> {
        match decision {
            Decision::Allow => {
                info!(
                    "Permission granted: {} ({}) can {} on {}",
                    actor.id, actor.role, action, target
                );
            }
            Decision::Deny(reason) => {
                warn!(
                    "Permission denied: {} ({}) cannot {} on {}: {}",
                    actor.id, actor.role, action, target, reason
                );
            }
        }
        decision.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::authorization::Role;

    #[test]
    fn test_service_forwards_decisions() {
        let service = AuthorizationService;
        let admin = Actor::new(Uuid::new_v4(), Role::Admin);
        let moderator = Actor::new(Uuid::new_v4(), Role::Moderator);
        let user = Actor::new(Uuid::new_v4(), Role::User);

        assert!(service.check_delete_user(&admin, &moderator).is_ok());
        assert_eq!(
            service.check_delete_user(&moderator, &admin),
            Err(DenyReason::ModeratorsCanOnlyDeleteUsers)
        );
        assert_eq!(
            service.check_delete_post(&user, &PostTarget::new(Uuid::new_v4(), moderator)),
            Err(DenyReason::NotAuthorizedToDeletePost)
        );

        let change = service.approve_promotion(&admin, &user).unwrap();
        assert_eq!(change.new_role(), Role::Moderator);
        assert_eq!(
            service.approve_demotion(&admin, &user),
            Err(DenyReason::AlreadyRegularUser)
        );
    }
}
