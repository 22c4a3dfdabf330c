use shutter_client::{SessionError, SessionEvent, UserNotice};
use shutter_core::{CanvasPoint, ServerMessage, StickerKind};

use crate::integration::init_tracing;
use crate::utils::ScriptedPeer;

#[tokio::test]
async fn test_room_full_notice() {
    init_tracing();

    let mut peer = ScriptedPeer::start("fourth").await.expect("start");
    let room = peer.room;
    peer.drain_events();

    peer.serve(ServerMessage::RoomFull { room, capacity: 3 })
        .expect("serve");
    assert_eq!(
        peer.next_event().await.expect("event"),
        SessionEvent::Notice(UserNotice::RoomFull { capacity: 3 })
    );
    assert_eq!(
        UserNotice::RoomFull { capacity: 3 }.to_string(),
        "This room is full (3 people max)."
    );

    assert_eq!(peer.handle.local_member(), None);
    assert!(peer.handle.roster().is_empty());
    assert_eq!(
        peer.handle
            .add_sticker(StickerKind::Emoji("🚪".to_owned()), CanvasPoint::default())
            .await,
        Err(SessionError::NotSeated)
    );
}

#[tokio::test]
async fn test_unknown_room_notice() {
    init_tracing();

    let mut peer = ScriptedPeer::start("lost").await.expect("start");
    let room = peer.room;
    peer.drain_events();

    peer.serve(ServerMessage::UnknownRoom { room }).expect("serve");
    assert_eq!(
        peer.next_event().await.expect("event"),
        SessionEvent::Notice(UserNotice::UnknownRoom)
    );
    assert_ne!(
        UserNotice::UnknownRoom.to_string(),
        UserNotice::ConnectionLost.to_string()
    );
}
