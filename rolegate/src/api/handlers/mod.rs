pub mod auth;
pub mod health;
pub mod posts;
pub mod users;

use uuid::Uuid;

/// Malformed ids cannot name an existing resource, so they are reported the
/// same way as unknown ones.
pub(crate) fn parse_id<E>(raw: &str, not_found: E) -> Result<Uuid, E> {
    Uuid::parse_str(raw).map_err(|_| not_found)
}
