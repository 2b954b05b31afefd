pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::seed::seed_demo_data;

pub use crate::state::AppState;

/// Connect the database, build shared state and seed demo shows if enabled.
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<AppState> {
    let db = DatabaseManager::connect(&config.database).await?;
    let state = AppState::new(config, db);

    if config.seed_demo_data {
        seed_demo_data(&state.shows).await?;
    }

    Ok(state)
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(auth_public_routes())
        // Protected API
        .merge(show_routes(state.clone()))
        // Global middleware
        .layer(cors_layer(&config.security.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new().route("/auth/login", post(auth::login))
}

fn show_routes(state: AppState) -> Router<AppState> {
    use axum::routing::post;
    use handlers::protected::{shows, users, watch};

    Router::new()
        .route("/shows", get(shows::list).post(shows::create))
        .route(
            "/shows/:id",
            get(shows::get).patch(shows::update).delete(shows::delete),
        )
        .route("/shows/:id/watch", post(watch::watch).delete(watch::unwatch))
        // Watch status is global; these expose the same sets under a per-user path
        .route("/users/:username/watched", get(users::watched))
        .route("/users/:username/unwatched", get(users::unwatched))
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
