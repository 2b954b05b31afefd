use axum::extract::State;
use serde::Deserialize;

use crate::api::{Json, Path, Query};
use crate::database::models::{Show, WatchFilter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `true` for watched shows, `false` for unwatched; omitted returns all
    pub watched: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShowRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShowRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// GET /shows?watched={true|false}
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Show>> {
    let filter = WatchFilter::from_query(query.watched.as_deref()).ok_or_else(|| {
        ApiError::unprocessable_entity("Query parameter 'watched' must be a boolean")
    })?;

    let shows = state.shows.list_shows(filter).await?;
    Ok(ApiResponse::success(shows))
}

/// POST /shows
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateShowRequest>,
) -> ApiResult<Show> {
    let show = state.shows.create_show(&payload.title).await?;
    Ok(ApiResponse::created(show))
}

/// GET /shows/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Show> {
    let show = state.shows.get_show(id).await?;
    Ok(ApiResponse::success(show))
}

/// PATCH /shows/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateShowRequest>,
) -> ApiResult<Show> {
    let show = state.shows.update_show(id, payload.title.as_deref()).await?;
    Ok(ApiResponse::success(show))
}

/// DELETE /shows/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.shows.delete_show(id).await?;
    Ok(ApiResponse::no_content())
}
