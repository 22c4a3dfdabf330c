use crate::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use shutter_core::{CreateRoomRequest, RoomInvite};
use tracing::info;

/// `POST /rooms`: open a room with the caller seated as host.
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomInvite>), (StatusCode, &'static str)> {
    if request.host.nickname.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "host nickname must not be empty"));
    }

    let room = state.rooms.create_room(request.host);
    let link = state.config.room_link(&room);
    info!("Room {} ready at {}", room, link);

    Ok((StatusCode::CREATED, Json(RoomInvite { room, link })))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "rooms": state.rooms.room_count(),
    }))
}
