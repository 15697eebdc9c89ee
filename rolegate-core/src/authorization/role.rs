use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles known to the system.
///
/// The intended privilege order is `user < moderator < admin`, exposed through
/// [`Role::rank`] and [`Role::outranks`]. Decisions never compare role names as
/// strings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// All roles, lowest privilege first
    pub fn all() -> [Role; 3] {
        [Role::User, Role::Moderator, Role::Admin]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Role::User => 0,
            Role::Moderator => 1,
            Role::Admin => 2,
        }
    }

    /// Strictly more privileged than `other`
    pub fn outranks(&self, other: &Role) -> bool {
        self.rank() > other.rank()
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Moderator)
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }

    /// Moderators and admins
    pub fn is_elevated(&self) -> bool {
        !self.is_user()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_intended_order() {
        assert!(Role::Admin.outranks(&Role::Moderator));
        assert!(Role::Moderator.outranks(&Role::User));
        assert!(Role::Admin.outranks(&Role::User));
        assert!(!Role::User.outranks(&Role::User));
        assert!(!Role::Moderator.outranks(&Role::Admin));
    }

    #[test]
    fn test_display_matches_wire_name() {
        for role in Role::all() {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&Role::Moderator).unwrap(),
            "\"moderator\""
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::default().is_elevated());
    }
}
