use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::{Json, Path};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WatchRequest {
    pub rating: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WatchResponse {
    pub message: String,
}

/// POST /shows/:id/watch - Mark a show globally watched with a 1..5 rating
pub async fn watch(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<WatchRequest>,
) -> ApiResult<WatchResponse> {
    state.shows.mark_watched(id, payload.rating).await?;
    Ok(ApiResponse::created(WatchResponse {
        message: "Show marked as globally watched".to_string(),
    }))
}

/// DELETE /shows/:id/watch - Mark a show globally unwatched
pub async fn unwatch(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.shows.unmark_watched(id).await?;
    Ok(ApiResponse::no_content())
}
