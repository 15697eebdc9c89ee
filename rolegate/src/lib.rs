//! rolegate library
//!
//! The binary is a thin wrapper around these modules; they are public so the
//! integration tests can build the router against an in-memory store.

pub mod api;
pub mod app_state;
pub mod http;
pub mod init_telemetry;
pub mod services;
pub mod settings;
pub mod stop_flag;
pub mod store;

pub use app_state::AppState;
