//! Authorization decision model for a fixed three-role system.
//!
//! Roles, the per-resource decisions for post deletion, user deletion,
//! promotion and demotion, the role state machine, and the coarse route gate.

pub mod action;
pub mod decision;
pub mod role;
pub mod subject;
pub mod transition;

pub use action::Action;
pub use decision::{
    can_delete_post, can_delete_user, can_demote, can_promote, has_any_role, Decision, DenyReason,
};
pub use role::Role;
pub use subject::{Actor, PostTarget};
pub use transition::{demote, promote, RoleChange};
