use crate::AppState;
use crate::room::RoomCommand;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use shutter_core::{ClientMessage, PeerId, PeerIdentity, RoomId, ServerMessage, codec};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(peer_id): Path<PeerId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, state))
}

/// The room this socket joined, if any.
type JoinedRoom = Option<(RoomId, mpsc::Sender<RoomCommand>)>;

async fn handle_socket(socket: WebSocket, peer_id: PeerId, state: AppState) {
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let connection = state.signaling.add_peer(peer_id, tx);
    state.signaling.send_signal(
        peer_id,
        &ServerMessage::IceConfig {
            ice_servers: state.signaling.get_ice_servers(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut joined: JoinedRoom = None;

    loop {
        tokio::select! {
            _ = (&mut send_task) => break,
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => match codec::decode::<ClientMessage>(text.as_str()) {
                    Ok(message) => handle_message(&state, peer_id, message, &mut joined).await,
                    Err(e) => warn!("Invalid ClientMessage from {}: {}", peer_id, e),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("WebSocket error for {}: {}", peer_id, e);
                    break;
                }
            },
        }
    }

    send_task.abort();

    if state.signaling.remove_peer(&peer_id, connection) {
        if let Some((_, room)) = joined {
            let _ = room.send(RoomCommand::Disconnect { peer_id }).await;
        }
    }
    info!("WebSocket disconnected: {}", peer_id);
}

async fn handle_message(
    state: &AppState,
    peer_id: PeerId,
    message: ClientMessage,
    joined: &mut JoinedRoom,
) {
    match message {
        ClientMessage::Join { room, nickname } => {
            let Some(room_tx) = state.rooms.room_sender(&room) else {
                info!("Peer {} asked for unknown room {}", peer_id, room);
                state
                    .signaling
                    .send_signal(peer_id, &ServerMessage::UnknownRoom { room });
                return;
            };

            if let Some((previous, previous_tx)) = joined.take() {
                if previous != room {
                    let _ = previous_tx.send(RoomCommand::Disconnect { peer_id }).await;
                }
            }

            info!("Peer {} wants to join room {}", peer_id, room);
            let cmd = RoomCommand::Join {
                peer: PeerIdentity::with_id(peer_id, nickname),
            };
            if room_tx.send(cmd).await.is_err() {
                warn!("Room {} closed before {} could join", room, peer_id);
                state
                    .signaling
                    .send_signal(peer_id, &ServerMessage::UnknownRoom { room });
                return;
            }
            *joined = Some((room, room_tx));
        }

        ClientMessage::Signal { to, handshake } => {
            let Some((_, room_tx)) = joined.as_ref() else {
                warn!("Handshake from {} before joining a room", peer_id);
                return;
            };
            let cmd = RoomCommand::Relay {
                from: peer_id,
                to,
                handshake,
            };
            let _ = room_tx.send(cmd).await;
        }

        ClientMessage::Broadcast { payload } => {
            let Some((_, room_tx)) = joined.as_ref() else {
                warn!("Broadcast from {} before joining a room", peer_id);
                return;
            };
            let cmd = RoomCommand::Broadcast {
                from: peer_id,
                payload,
            };
            let _ = room_tx.send(cmd).await;
        }
    }
}
