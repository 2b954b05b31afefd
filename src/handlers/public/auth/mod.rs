// handlers/public/auth/mod.rs - Token acquisition; no authentication required

pub mod login;

pub use login::{login, LoginRequest, TokenResponse};
