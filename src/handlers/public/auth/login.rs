// handlers/public/auth/login.rs - POST /auth/login handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::Json;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: String,
}

/// POST /auth/login - Exchange a username/password pair for a bearer token
///
/// Expected Input:
/// ```json
/// { "username": "ray", "password": "password123" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI...", "token_type": "bearer", "user": "ray" }
/// ```
///
/// Unknown users and wrong passwords both answer 401 with the same detail.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let access_token = state
        .auth
        .login(&payload.username, &payload.password)
        .map_err(|e| {
            tracing::warn!(user = %payload.username, "Login failed: {}", e);
            e
        })?;

    tracing::info!(user = %payload.username, "Login succeeded");

    Ok(ApiResponse::success(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: payload.username,
    }))
}
