use crate::config::ServerConfig;
use crate::routes::{create_room, health};
use crate::room::RoomManager;
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub rooms: RoomManager,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let signaling = SignalingService::new(config.ice_servers.clone());
        let rooms = RoomManager::new(
            Arc::new(signaling.clone()),
            config.max_peers,
            config.room_queue,
        )
        .with_host_join_timeout(config.host_join_timeout);
        Self {
            signaling,
            rooms,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // Browser clients are served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/rooms", post(create_room))
        .route("/ws/{peer_id}", get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process stops.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve_on(listener, config).await
}

/// Serve on an already bound listener. Tests bind `127.0.0.1:0` and read the
/// port back before calling this.
pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let state = AppState::new(config);
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
