use shutter_client::SessionEvent;
use shutter_core::{
    CanvasPoint, ClientMessage, FrameKind, LifecycleEvent, PeerIdentity, RoomPayload,
    ServerMessage, StickerKind,
};

use crate::integration::init_tracing;
use crate::utils::{ScriptedPeer, member};

#[tokio::test]
async fn test_host_catches_up_newcomer() {
    init_tracing();

    let mut host = ScriptedPeer::start("host").await.expect("start");
    let roster = vec![member(&host.identity, 0)];
    host.seat(host.identity.id, 4, roster).await.expect("seat");

    let stickers = host
        .handle
        .add_sticker(StickerKind::Emoji("🎈".to_owned()), CanvasPoint::new(0.5, 0.5))
        .await
        .expect("add sticker");
    host.handle.toggle_frame().await.expect("toggle");
    host.handle.navigate_to_photo_room().await.expect("navigate");
    for _ in 0..3 {
        host.next_frame().await.expect("broadcast");
    }

    let guest = PeerIdentity::new("guest");
    host.serve(ServerMessage::PeerJoined {
        member: member(&guest, 1),
    })
    .expect("serve");

    let mut caught_up = Vec::new();
    for _ in 0..3 {
        match host.next_frame().await.expect("catch-up frame") {
            ClientMessage::Broadcast { payload } => caught_up.push(payload),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(
        caught_up,
        vec![
            RoomPayload::Stickers(stickers),
            RoomPayload::Frame(FrameKind::DefaultWhite),
            RoomPayload::Lifecycle(LifecycleEvent::NavigateToPhotoRoom),
        ]
    );
    assert!(host.wire_is_quiet().await);
}

#[tokio::test]
async fn test_guest_does_not_rebroadcast_on_join() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");

    guest
        .serve(ServerMessage::PeerJoined {
            member: member(&PeerIdentity::new("other"), 2),
        })
        .expect("serve");

    assert!(guest.wire_is_quiet().await);
    assert_eq!(guest.handle.roster().len(), 3);
}

#[tokio::test]
async fn test_host_catches_up_rejoined_guest() {
    init_tracing();

    let mut host = ScriptedPeer::start("host").await.expect("start");
    let guest = PeerIdentity::new("guest");
    let roster = vec![member(&host.identity, 0), member(&guest, 1)];
    host.seat(host.identity.id, 4, roster).await.expect("seat");

    let stickers = host
        .handle
        .add_sticker(StickerKind::Emoji("🎈".to_owned()), CanvasPoint::new(0.2, 0.8))
        .await
        .expect("add sticker");
    host.next_frame().await.expect("broadcast");

    // The guest reconnected and the server announces it again.
    host.serve(ServerMessage::PeerJoined {
        member: member(&guest, 1),
    })
    .expect("serve");

    let mut caught_up = Vec::new();
    for _ in 0..2 {
        match host.next_frame().await.expect("catch-up frame") {
            ClientMessage::Broadcast { payload } => caught_up.push(payload),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(
        caught_up,
        vec![
            RoomPayload::Stickers(stickers),
            RoomPayload::Frame(FrameKind::DefaultBlack),
        ]
    );
    assert!(host.wire_is_quiet().await);

    // Membership did not change, so nothing is reported.
    let events = host.quiet_events().await;
    assert!(
        !events.iter().any(|e| matches!(e, SessionEvent::Membership(_))),
        "unexpected membership event in {events:?}"
    );
    assert_eq!(host.handle.roster().len(), 2);
}
