use serde::Deserialize;

use crate::authorization::Role;
use crate::utils::secret::RedactedSecret;

/// Signing secret used when none is configured. Only suitable for local development.
pub const DEFAULT_DEV_JWT_SECRET: &str = "rolegate-development-secret";
pub const DEFAULT_COOKIE_NAME: &str = "token";
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 12;

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: RedactedSecret,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl ApiServer {
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret.expose_secret() == DEFAULT_DEV_JWT_SECRET
    }
}

fn default_jwt_secret() -> RedactedSecret {
    RedactedSecret::from(DEFAULT_DEV_JWT_SECRET)
}

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_password_hash_cost() -> u32 {
    DEFAULT_PASSWORD_HASH_COST
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:3000".to_string(),
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

/// An account created at startup if its username is not taken yet
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: RedactedSecret,
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_fields() {
        let api: ApiServer =
            serde_json::from_str(r#"{ "bind_address": "127.0.0.1:4000" }"#).unwrap();
        assert_eq!(api.bind_address, "127.0.0.1:4000");
        assert_eq!(api.token_ttl_hours, 24);
        assert_eq!(api.cookie_name, "token");
        assert!(!api.cookie_secure);
        assert_eq!(api.password_hash_cost, DEFAULT_PASSWORD_HASH_COST);
        assert!(api.uses_default_jwt_secret());
    }

    #[test]
    fn test_seed_user_role_defaults_to_user() {
        let seed: SeedUser =
            serde_json::from_str(r#"{ "username": "alice", "password": "pw" }"#).unwrap();
        assert_eq!(seed.role, Role::User);

        let seed: SeedUser = serde_json::from_str(
            r#"{ "username": "root", "password": "pw", "role": "admin" }"#,
        )
        .unwrap();
        assert_eq!(seed.role, Role::Admin);
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let api = ApiServer::default();
        let printed = format!("{:?}", api);
        assert!(!printed.contains(DEFAULT_DEV_JWT_SECRET));
    }
}
