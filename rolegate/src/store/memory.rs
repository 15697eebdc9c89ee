use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use rolegate_core::api::PostView;
use rolegate_core::authorization::{Actor, PostTarget, RoleChange};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{NewUser, PostRecord, ResourceStore, StoreError, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    posts: HashMap<Uuid, PostRecord>,
}

/// Users and posts share one lock, so every write (including the cascading
/// user delete) is observed by readers as a single step.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn post_count(&self) -> usize {
        self.tables.read().await.posts.len()
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::UsernameTaken(new_user.username));
        }

        let user = UserRecord {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: Utc::now(),
        };
        t.users.insert(user.id, user.clone());
        debug!("Created user {} with role {}", user.id, user.role);
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Option<UserRecord> {
        self.tables.read().await.users.get(&id).cloned()
    }

    async fn find_user_by_username(&self, username: &str) -> Option<UserRecord> {
        let t = self.tables.read().await;
        t.users.values().find(|u| u.username == username).cloned()
    }

    async fn list_users(&self) -> Vec<UserRecord> {
        let t = self.tables.read().await;
        let mut users: Vec<UserRecord> = t.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        users
    }

    #[instrument(skip(self))]
    async fn apply_role_change(&self, change: RoleChange) -> Result<UserRecord, StoreError> {
        let mut t = self.tables.write().await;
        let user = t
            .users
            .get_mut(&change.user_id())
            .ok_or(StoreError::UserNotFound(change.user_id()))?;

        if user.role != change.previous_role() {
            return Err(StoreError::StaleTarget(user.id));
        }
        user.role = change.new_role();
        Ok(user.clone())
    }

    #[instrument(skip(self))]
    async fn delete_user_cascade(&self, target: Actor) -> Result<usize, StoreError> {
        let mut t = self.tables.write().await;
        match t.users.get(&target.id) {
            None => return Err(StoreError::UserNotFound(target.id)),
            Some(user) if user.role != target.role => {
                return Err(StoreError::StaleTarget(target.id))
            }
            Some(_) => {}
        }

        let before = t.posts.len();
        t.posts.retain(|_, post| post.author_id != target.id);
        let removed = before - t.posts.len();
        t.users.remove(&target.id);

        debug!("Deleted user {} and {} posts", target.id, removed);
        Ok(removed)
    }

    #[instrument(skip(self, title, content))]
    async fn create_post(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<PostRecord, StoreError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&author_id) {
            return Err(StoreError::UserNotFound(author_id));
        }

        let post = PostRecord {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: Utc::now(),
        };
        t.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: Uuid) -> Option<PostTarget> {
        let t = self.tables.read().await;
        let post = t.posts.get(&id)?;
        let author = t.users.get(&post.author_id)?;
        Some(PostTarget::new(post.id, author.actor()))
    }

    async fn list_posts(&self) -> Vec<PostView> {
        let t = self.tables.read().await;
        let mut posts: Vec<&PostRecord> = t.posts.values().collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        posts
            .into_iter()
            .filter_map(|post| t.users.get(&post.author_id).map(|author| post.view(author.as_author())))
            .collect()
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, approved: PostTarget) -> Result<(), StoreError> {
        let mut t = self.tables.write().await;
        let post = t
            .posts
            .get(&approved.id)
            .ok_or(StoreError::PostNotFound(approved.id))?;

        let current_author = t.users.get(&post.author_id).map(UserRecord::actor);
        if current_author != Some(approved.author) {
            return Err(StoreError::StaleTarget(approved.id));
        }

        t.posts.remove(&approved.id);
        debug!("Deleted post {}", approved.id);
        Ok(())
    }
}
