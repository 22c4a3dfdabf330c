use shutter_client::SessionEvent;
use shutter_core::{
    CanvasPoint, FrameKind, PeerIdentity, RoomPayload, ServerMessage, Sticker, StickerKind,
};

use crate::integration::init_tracing;
use crate::utils::{ScriptedPeer, member};

#[tokio::test]
async fn test_remote_stickers_converge() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");
    assert!(guest.handle.current_stickers().is_empty());

    let s1 = Sticker::new(
        StickerKind::Emoji("😎".to_owned()),
        CanvasPoint::new(0.1, 0.2),
        host.id,
    );
    let broadcast = ServerMessage::Broadcast {
        from: host.id,
        payload: RoomPayload::Stickers(vec![s1.clone()]),
    };

    guest.serve(broadcast.clone()).expect("serve");
    assert_eq!(
        guest.next_event().await.expect("event"),
        SessionEvent::StickersChanged(vec![s1.clone()])
    );
    assert!(guest.quiet_events().await.is_empty());

    // Duplicate delivery changes nothing and announces nothing.
    guest.serve(broadcast).expect("serve");
    assert!(guest.quiet_events().await.is_empty());
    assert_eq!(guest.handle.current_stickers(), vec![s1]);

    // Receiving never sends anything back.
    assert!(guest.wire_is_quiet().await);
}

#[tokio::test]
async fn test_remote_frame_overwrites_once() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");

    for _ in 0..2 {
        guest
            .serve(ServerMessage::Broadcast {
                from: host.id,
                payload: RoomPayload::Frame(FrameKind::DefaultWhite),
            })
            .expect("serve");
    }

    let events = guest.quiet_events().await;
    assert_eq!(events, vec![SessionEvent::FrameChanged(FrameKind::DefaultWhite)]);
    assert_eq!(guest.handle.current_frame(), FrameKind::DefaultWhite);
}

#[tokio::test]
async fn test_malformed_frame_is_silent() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");

    guest.link.send_raw(r#"{"op":"Broadcast","d":{"oops":true}}"#).expect("send");
    assert!(guest.quiet_events().await.is_empty());

    // The link is still usable afterwards.
    guest
        .serve(ServerMessage::Broadcast {
            from: host.id,
            payload: RoomPayload::Frame(FrameKind::DefaultWhite),
        })
        .expect("serve");
    assert_eq!(
        guest.next_event().await.expect("event"),
        SessionEvent::FrameChanged(FrameKind::DefaultWhite)
    );
}
