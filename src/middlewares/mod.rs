pub mod auth;
pub mod session;

pub use auth::{auth_middleware, AuthUser};
pub use session::session_gate;
