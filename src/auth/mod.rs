//! Authentication: credential storage boundary and session tokens

pub mod error;
pub mod password;
pub mod service;
pub mod tokens;

pub use error::AuthError;
pub use service::{AuthService, LoginRequest, LoginResponse, RegisterRequest, User};
pub use tokens::{Claims, TokenService};
