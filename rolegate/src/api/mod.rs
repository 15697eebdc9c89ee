pub mod auth_core;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session_auth;
