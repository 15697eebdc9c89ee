use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::services::{AuthorizationService, PasswordHasher, SessionManager};
use crate::settings::config::Settings;
use crate::stop_flag;
use crate::store::{InMemoryStore, NewUser, ResourceStore, StoreError};

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stop_flag: stop_flag::StopFlag,
    pub store: Arc<dyn ResourceStore>,
    pub sessions: SessionManager,
    pub passwords: PasswordHasher,
    pub auth_service: AuthorizationService,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<SharedAppState> {
        let state = Self::from_settings(settings).await?;
        stop_flag::register_signal_handler(&state.stop_flag);
        Ok(state)
    }

    pub fn new_for_config_only() -> anyhow::Result<SharedAppState> {
        let settings = Settings::new()?;
        Ok(Arc::new(Self::assemble(settings, Arc::new(InMemoryStore::new()))))
    }

    /// Build state around a fresh in-memory store and create the configured
    /// seed accounts. Does not install signal handlers.
    pub async fn from_settings(settings: Settings) -> anyhow::Result<SharedAppState> {
        anyhow::ensure!(
            !settings.api.jwt_secret.is_empty(),
            "api.jwt_secret must not be empty"
        );
        let state = Self::assemble(settings, Arc::new(InMemoryStore::new()));

        if state.settings.api.uses_default_jwt_secret() {
            warn!("Using the built-in development JWT secret, set api.jwt_secret for any shared deployment");
        }

        state.seed_users().await?;
        Ok(Arc::new(state))
    }

    fn assemble(settings: Settings, store: Arc<dyn ResourceStore>) -> AppState {
        AppState {
            sessions: SessionManager::from_settings(&settings.api),
            passwords: PasswordHasher::new(settings.api.password_hash_cost),
            stop_flag: stop_flag::StopFlag::new(),
            auth_service: AuthorizationService,
            store,
            settings,
        }
    }

    async fn seed_users(&self) -> anyhow::Result<()> {
        for seed in &self.settings.seed_users {
            let password_hash = self.passwords.hash(seed.password.expose_secret()).await?;
            let new_user = NewUser {
                username: seed.username.clone(),
                password_hash,
                role: seed.role,
            };
            match self.store.create_user(new_user).await {
                Ok(user) => info!("Seeded user '{}' with role {}", user.username, user.role),
                Err(StoreError::UsernameTaken(username)) => {
                    debug!("Seed user '{}' already exists, skipping", username)
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;
    use rolegate_core::authorization::Role;

    #[tokio::test]
    async fn test_seed_users_are_created_once() {
        let settings: Settings = Config::builder()
            .add_source(config::File::with_name("tests/test_config"))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let state = AppState::from_settings(settings).await.unwrap();
        let users = state.store.list_users().await;
        assert_eq!(users.len(), 4);

        let root = state.store.find_user_by_username("root").await.unwrap();
        assert_eq!(root.role, Role::Admin);
        assert!(state.passwords.verify("root-password", &root.password_hash).await);

        let alice = state.store.find_user_by_username("alice").await.unwrap();
        assert_eq!(alice.role, Role::User);

        state.seed_users().await.unwrap();
        assert_eq!(state.store.list_users().await.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_jwt_secret_is_rejected() {
        let settings: Settings = Config::builder()
            .add_source(config::File::with_name("tests/test_config"))
            .set_override("api.jwt_secret", "")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let err = AppState::from_settings(settings).await.unwrap_err();
        assert!(err.to_string().contains("jwt_secret"), "{err}");
    }
}
