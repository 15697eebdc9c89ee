//! Resource store for users and posts.
//!
//! The decision model never touches the store. Handlers load targets from it,
//! ask the decision model, then apply the outcome through the guarded write
//! operations below.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolegate_core::api::{PostAuthor, PostView, UserProfile};
use rolegate_core::authorization::{Actor, PostTarget, Role, RoleChange};
use thiserror::Error;
use uuid::Uuid;

pub use memory::InMemoryStore;

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }

    pub fn as_author(&self) -> PostAuthor {
        PostAuthor {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl PostRecord {
    pub fn view(&self, author: PostAuthor) -> PostView {
        PostView {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            author,
            created_at: self.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// The target changed between the decision and the write
    #[error("User {0} was modified concurrently")]
    StaleTarget(Uuid),
}

#[async_trait]
pub trait ResourceStore: Send + Sync + std::fmt::Debug {
    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_user(&self, id: Uuid) -> Option<UserRecord>;

    async fn find_user_by_username(&self, username: &str) -> Option<UserRecord>;

    async fn list_users(&self) -> Vec<UserRecord>;

    /// Persist an approved role change. Fails with `StaleTarget` if the user's
    /// role no longer matches the role the change was approved for.
    async fn apply_role_change(&self, change: RoleChange) -> Result<UserRecord, StoreError>;

    /// Remove a user together with every post they authored, as one unit.
    /// `target` is the snapshot the deletion was approved for. Returns the
    /// number of posts removed.
    async fn delete_user_cascade(&self, target: Actor) -> Result<usize, StoreError>;

    async fn create_post(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<PostRecord, StoreError>;

    /// A post with its author's current identity
    async fn find_post(&self, id: Uuid) -> Option<PostTarget>;

    /// Posts joined with their authors, oldest first
    async fn list_posts(&self) -> Vec<PostView>;

    /// Remove a post. `approved` is the snapshot the deletion was approved
    /// for; fails with `StaleTarget` if the author's role has changed since.
    async fn delete_post(&self, approved: PostTarget) -> Result<(), StoreError>;
}
