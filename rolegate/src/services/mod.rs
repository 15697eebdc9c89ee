pub mod authorization;
pub mod password;
pub mod session;

pub use authorization::AuthorizationService;
pub use password::PasswordHasher;
pub use session::{SessionError, SessionManager};
