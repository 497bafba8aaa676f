use crate::game::config::GameConfig;
use crate::game::constants::DEFAULT_PORT;
use crate::game::room::{Room, RoomStats};
use crate::transport::ws_session::handle_socket;
use axum::{
    extract::{State, WebSocketUpgrade},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
struct ArenaState {
    room: Arc<Room>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    running: bool,
    halted: bool,
    #[serde(flatten)]
    stats: RoomStats,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

pub async fn run_arena_server(config: GameConfig) -> anyhow::Result<()> {
    tracing::info!(
        bots = config.bot_count,
        food = config.food_count,
        tick_rate = config.tick_rate,
        broadcast_rate = config.broadcast_rate,
        seed = ?config.rng_seed,
        "starting arena"
    );
    let room = Arc::new(Room::new(config)?);
    room.start();

    let app = router(Arc::clone(&room));

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let address = format!("0.0.0.0:{port}");
    tracing::info!("arena listening on {address}");
    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(room: Arc<Room>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);
    Router::new()
        .route("/api/health", get(health))
        .route("/api/state", get(arena_state))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(Arc::new(ArenaState { room }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ArenaState>>,
) -> impl IntoResponse {
    let room = Arc::clone(&state.room);
    ws.on_upgrade(move |socket| handle_socket(socket, room))
}

async fn health(State(state): State<Arc<ArenaState>>) -> impl IntoResponse {
    let halted = state.room.is_halted();
    Json(HealthResponse {
        ok: !halted,
        running: state.room.is_running(),
        halted,
        stats: state.room.stats().await,
    })
}

async fn arena_state(State(state): State<Arc<ArenaState>>) -> impl IntoResponse {
    match state.room.snapshot().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                ok: false,
                error: error.to_string(),
            }),
        )
            .into_response(),
    }
}
