pub mod auth;
pub mod response;

pub use auth::{require_admin_middleware, session_auth_middleware, AuthSession};
pub use response::{ApiResponse, ApiResult};
