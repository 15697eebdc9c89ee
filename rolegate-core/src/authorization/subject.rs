use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// An identity and its current role.
///
/// Used both for the actor making a request and for a user being acted upon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is(&self, other: &Actor) -> bool {
        self.id == other.id
    }
}

/// A post as seen by the decision model: its id and its author's identity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostTarget {
    pub id: Uuid,
    pub author: Actor,
}

impl PostTarget {
    pub fn new(id: Uuid, author: Actor) -> Self {
        Self { id, author }
    }
}
