use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

use auth::session::SessionStore;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        // Logout stays public: ending an already-dead session is a no-op,
        // not an auth failure.
        .route("/api/auth/logout", post(handlers::auth::logout));

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        // Moods
        .route("/api/moods", post(handlers::moods::record_mood))
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods/export", get(handlers::moods::export_moods))
        // Habits
        .route("/api/habits", post(handlers::habits::add_habit))
        .route("/api/habits", get(handlers::habits::list_habits))
        .route("/api/habits/:id/done", put(handlers::habits::set_done))
        // Aggregations
        .route("/api/insights", get(handlers::insights::get_insights))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
