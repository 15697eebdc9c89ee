pub mod api;
pub mod authorization;
pub mod settings;
pub mod utils;
