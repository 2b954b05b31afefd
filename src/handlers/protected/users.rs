use axum::extract::{Extension, State};

use crate::api::Path;
use crate::database::models::Show;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

// Watch status is global: every known user sees the same sets.

/// GET /users/:username/watched
pub async fn watched(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<Vec<Show>> {
    ensure_known_user(&state, &username)?;
    tracing::debug!(caller = %caller.username, user = %username, "Watched shows requested");
    let shows = state.shows.list_watched_by_user(&username).await?;
    Ok(ApiResponse::success(shows))
}

/// GET /users/:username/unwatched
pub async fn unwatched(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<Vec<Show>> {
    ensure_known_user(&state, &username)?;
    tracing::debug!(caller = %caller.username, user = %username, "Unwatched shows requested");
    let shows = state.shows.list_unwatched_by_user(&username).await?;
    Ok(ApiResponse::success(shows))
}

fn ensure_known_user(state: &AppState, username: &str) -> Result<(), ApiError> {
    if state.auth.is_known_user(username) {
        Ok(())
    } else {
        Err(ApiError::not_found("User not found"))
    }
}
