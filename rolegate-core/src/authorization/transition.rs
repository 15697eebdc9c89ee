//! Role state machine.
//!
//! ```text
//!   user --promote--> moderator --demote--> user
//!   admin: terminal
//! ```
//!
//! A [`RoleChange`] can only be obtained from [`promote`] or [`demote`], so any
//! code that persists a new role has passed the decision model first.

use uuid::Uuid;

use super::decision::{can_demote, can_promote, DenyReason};
use super::role::Role;
use super::subject::Actor;

/// An approved role transition for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RoleChange {
    user_id: Uuid,
    from: Role,
    to: Role,
}

impl RoleChange {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Role the target held when the change was approved
    pub fn previous_role(&self) -> Role {
        self.from
    }

    pub fn new_role(&self) -> Role {
        self.to
    }

    /// The target as it looks after the change
    pub fn applied(&self) -> Actor {
        Actor::new(self.user_id, self.to)
    }
}

pub fn promote(actor: &Actor, target: &Actor) -> Result<RoleChange, DenyReason> {
    can_promote(actor, target).into_result()?;
    Ok(RoleChange {
        user_id: target.id,
        from: target.role,
        to: Role::Moderator,
    })
}

pub fn demote(actor: &Actor, target: &Actor) -> Result<RoleChange, DenyReason> {
    can_demote(actor, target).into_result()?;
    Ok(RoleChange {
        user_id: target.id,
        from: target.role,
        to: Role::User,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    #[test]
    fn test_promote_moves_user_to_moderator() {
        let target = Actor::new(Uuid::new_v4(), Role::User);
        let change = promote(&admin(), &target).unwrap();
        assert_eq!(change.user_id(), target.id);
        assert_eq!(change.previous_role(), Role::User);
        assert_eq!(change.new_role(), Role::Moderator);
    }

    #[test]
    fn test_promote_then_demote_returns_to_user() {
        let admin = admin();
        let original = Actor::new(Uuid::new_v4(), Role::User);

        let promoted = promote(&admin, &original).unwrap().applied();
        assert_eq!(promoted.role, Role::Moderator);

        let demoted = demote(&admin, &promoted).unwrap().applied();
        assert_eq!(demoted, original);
    }

    #[test]
    fn test_admin_is_terminal() {
        let admin = admin();
        let other_admin = Actor::new(Uuid::new_v4(), Role::Admin);
        assert_eq!(
            promote(&admin, &other_admin),
            Err(DenyReason::AlreadyElevated)
        );
        assert_eq!(
            demote(&admin, &other_admin),
            Err(DenyReason::AdminsCannotBeDemoted)
        );
    }

    #[test]
    fn test_self_transitions_are_rejected() {
        let admin = admin();
        let moderator = Actor::new(Uuid::new_v4(), Role::Moderator);
        let user = Actor::new(Uuid::new_v4(), Role::User);
        assert_eq!(promote(&admin, &moderator), Err(DenyReason::AlreadyElevated));
        assert_eq!(demote(&admin, &user), Err(DenyReason::AlreadyRegularUser));
    }

    #[test]
    fn test_moderator_cannot_transition_anyone() {
        let moderator = Actor::new(Uuid::new_v4(), Role::Moderator);
        let user = Actor::new(Uuid::new_v4(), Role::User);
        assert_eq!(
            promote(&moderator, &user),
            Err(DenyReason::RoleChangeRequiresAdmin)
        );
    }
}
