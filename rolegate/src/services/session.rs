//! Session tokens.
//!
//! Tokens are HS256 JWTs that only carry the user id. The role is looked up
//! again on every request, so promotions, demotions and deletions apply to
//! existing sessions immediately.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rolegate_core::settings::api_server::ApiServer;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to issue token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),
}

#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    cookie_name: String,
    cookie_secure: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn from_settings(api: &ApiServer) -> Self {
        let secret = api.jwt_secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::hours(api.token_ttl_hours as i64),
            cookie_name: api.cookie_name.clone(),
            cookie_secure: api.cookie_secure,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, SessionError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, SessionError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(SessionError::Issue)
    }

    /// Returns the user id the token was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, SessionError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(SessionError::Invalid)?
            .claims;
        Uuid::parse_str(&claims.sub).map_err(|_| SessionError::InvalidSubject(claims.sub))
    }

    /// `Authorization: Bearer` wins over the session cookie
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());
        if let Some(token) = bearer {
            return Some(token.to_string());
        }

        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == self.cookie_name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }

    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            self.cookie_name,
            token,
            self.ttl.num_seconds(),
            if self.cookie_secure { "; Secure" } else { "" }
        )
    }

    pub fn cleared_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.cookie_name,
            if self.cookie_secure { "; Secure" } else { "" }
        )
    }
}
