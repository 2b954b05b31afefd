use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service banner with the configured usernames
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let users: Vec<&str> = state.auth.usernames().collect();

    Json(json!({
        "message": "TV Show Tracker API",
        "version": env!("CARGO_PKG_VERSION"),
        "users": users,
    }))
}

/// GET /health - Liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.shows.database().health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "error",
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
