use application::FilmrateApp;
use axum::{
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod error;
pub mod extract;
mod handlers;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<FilmrateApp>,
    /// `count` used by `GET /films/popular` when the query omits it.
    pub popular_default_count: i64,
}

impl AppState {
    pub fn new(app: Arc<FilmrateApp>, popular_default_count: i64) -> Self {
        Self {
            app,
            popular_default_count,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Users and friendships
        .route(
            "/users",
            get(handlers::users::list_users)
                .post(handlers::users::create_user)
                .put(handlers::users::update_user),
        )
        .route("/users/:id", get(handlers::users::get_user))
        .route("/users/:id/friends", get(handlers::users::list_friends))
        .route(
            "/users/:id/friends/:friend_id",
            put(handlers::users::add_friend).delete(handlers::users::remove_friend),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(handlers::users::common_friends),
        )
        // Films and likes
        .route(
            "/films",
            get(handlers::films::list_films)
                .post(handlers::films::create_film)
                .put(handlers::films::update_film),
        )
        .route("/films/popular", get(handlers::films::popular_films))
        .route("/films/:id", get(handlers::films::get_film))
        .route(
            "/films/:id/like/:user_id",
            put(handlers::films::add_like).delete(handlers::films::remove_like),
        )
        // Reference data
        .route("/genres", get(handlers::reference::list_genres))
        .route("/genres/:id", get(handlers::reference::get_genre))
        .route("/mpa", get(handlers::reference::list_ratings))
        .route("/mpa/:id", get(handlers::reference::get_rating))
        // Health check
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
