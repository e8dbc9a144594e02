use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Instant};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::WebSockets;
use crate::models::Game;

pub struct Handle {}

impl Handle {
    pub fn router(game: Arc<Mutex<Game>>, static_files_path: &str) -> Router {
        Router::new()
            .route("/ws", get(Self::websocket))
            .route("/new_game", post(Self::new_game))
            .route("/healthz", get(Self::health))
            .fallback_service(ServeDir::new(static_files_path))
            .layer(TraceLayer::new_for_http())
            .with_state(game)
    }

    pub async fn websocket(
        ws: WebSocketUpgrade,
        State(game): State<Arc<Mutex<Game>>>,
    ) -> impl IntoResponse {
        ws.on_upgrade(|socket| async move { WebSockets::new(socket, game).await })
    }

    pub async fn new_game(State(game): State<Arc<Mutex<Game>>>) -> impl IntoResponse {
        game.lock().await.new_game(Instant::now());
        StatusCode::NO_CONTENT
    }

    pub async fn health() -> &'static str {
        "ok"
    }
}
