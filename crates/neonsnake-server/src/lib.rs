pub mod accounts;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod spectate;
pub mod sse;
pub mod state;
pub mod time;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use neonsnake_core::config::SnakeConfig;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let web_root = config.web_root.clone();
    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/auth/signup", post(api::signup))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/auth/me", get(api::me))
        .route("/leaderboard", get(api::get_leaderboard))
        .route("/scores", post(api::submit_score))
        .route("/live", get(api::list_live_games))
        .route("/live/{game_id}/stream", get(sse::live_stream));

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    (app, state)
}

/// Register and launch the seeded live-game drivers.
pub fn spawn_live_games(state: &AppState) {
    spectate::spawn_seeded(
        &state.spectate,
        &SnakeConfig::load(),
        state.config.spectate.decision_interval_ms,
    );
}
