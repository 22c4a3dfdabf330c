use shutter_core::PeerIdentity;
use shutter_server::RoomCommand;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::SIGNAL_TIMEOUT;

#[tokio::test]
async fn test_room_closes_without_connected_members() {
    init_tracing();

    // The host never opens a socket; only the guest ever joins.
    let mut room = create_test_room(3);
    let guest = PeerIdentity::new("guest");

    room.join(&guest).await.expect("guest join failed");
    room.send(RoomCommand::Disconnect { peer_id: guest.id })
        .await
        .expect("disconnect failed");

    tokio::time::timeout(SIGNAL_TIMEOUT, room.cmd_tx.closed())
        .await
        .expect("room kept running with nobody connected");
}

#[tokio::test]
async fn test_rejected_socket_does_not_close_room() {
    init_tracing();

    let mut room = create_test_room(1);
    let stranger = PeerIdentity::new("stranger");

    let reply = room.join(&stranger).await.expect("join failed");
    assert!(matches!(reply, shutter_core::ServerMessage::RoomFull { .. }));
    room.send(RoomCommand::Disconnect {
        peer_id: stranger.id,
    })
    .await
    .expect("disconnect failed");

    // The host's seat is still held for it.
    let host = room.host.clone();
    room.join(&host).await.expect("host join failed");
    assert!(!room.cmd_tx.is_closed());
}
