//! The fixed decision table for state-changing actions.
//!
//! Every function here is pure and synchronous. Missing targets and missing
//! identities are resolved by the caller before a decision is requested.

use super::role::Role;
use super::subject::{Actor, PostTarget};

/// Why a decision denied an action. `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DenyReason {
    #[error("not authorized to delete this post")]
    NotAuthorizedToDeletePost,

    #[error("moderators can only delete users")]
    ModeratorsCanOnlyDeleteUsers,

    #[error("admins cannot delete other admins")]
    AdminsCannotDeleteAdmins,

    #[error("access denied")]
    InsufficientRole,

    #[error("user is already an admin or moderator")]
    AlreadyElevated,

    #[error("admins cannot be demoted")]
    AdminsCannotBeDemoted,

    #[error("user is already a regular user")]
    AlreadyRegularUser,

    #[error("only admins can change roles")]
    RoleChangeRequiresAdmin,
}

impl DenyReason {
    /// The target is already in the requested state, as opposed to the actor
    /// lacking the privilege.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DenyReason::AlreadyElevated | DenyReason::AlreadyRegularUser
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }

    pub fn into_result(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// Owners may always delete their posts. Otherwise admins may delete posts of
/// non-admins and moderators may delete posts of plain users.
pub fn can_delete_post(actor: &Actor, post: &PostTarget) -> Decision {
    let is_owner = actor.is(&post.author);
    let admin_over_non_admin = actor.role.is_admin() && !post.author.role.is_admin();
    let moderator_over_user = actor.role.is_moderator() && post.author.role.is_user();

    if is_owner || admin_over_non_admin || moderator_over_user {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::NotAuthorizedToDeletePost)
    }
}

/// Moderators may delete plain users, admins may delete anyone but admins.
/// Plain users never delete accounts.
pub fn can_delete_user(actor: &Actor, target: &Actor) -> Decision {
    match (actor.role, target.role) {
        (Role::User, _) => Decision::Deny(DenyReason::InsufficientRole),
        (Role::Moderator, Role::User) => Decision::Allow,
        (Role::Moderator, _) => Decision::Deny(DenyReason::ModeratorsCanOnlyDeleteUsers),
        (Role::Admin, Role::Admin) => Decision::Deny(DenyReason::AdminsCannotDeleteAdmins),
        (Role::Admin, _) => Decision::Allow,
    }
}

/// `user -> moderator`, admins only
pub fn can_promote(actor: &Actor, target: &Actor) -> Decision {
    if !actor.role.is_admin() {
        return Decision::Deny(DenyReason::RoleChangeRequiresAdmin);
    }
    if target.role.is_elevated() {
        Decision::Deny(DenyReason::AlreadyElevated)
    } else {
        Decision::Allow
    }
}

/// `moderator -> user`, admins only
pub fn can_demote(actor: &Actor, target: &Actor) -> Decision {
    if !actor.role.is_admin() {
        return Decision::Deny(DenyReason::RoleChangeRequiresAdmin);
    }
    match target.role {
        Role::Moderator => Decision::Allow,
        Role::Admin => Decision::Deny(DenyReason::AdminsCannotBeDemoted),
        Role::User => Decision::Deny(DenyReason::AlreadyRegularUser),
    }
}

/// Coarse route gate: is the actor's role one of `required`?
pub fn has_any_role(actor: &Actor, required: &[Role]) -> bool {
    required.contains(&actor.role)
}
