use shutter_client::SessionError;
use shutter_core::{FrameKind, PeerIdentity, RoomPhase};

use crate::integration::init_tracing;
use crate::utils::{ScriptedPeer, member};

#[tokio::test]
async fn test_guest_cannot_drive_room() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");

    assert_eq!(guest.handle.toggle_frame().await, Err(SessionError::NotHost));
    assert_eq!(guest.handle.start_countdown().await, Err(SessionError::NotHost));
    assert_eq!(
        guest.handle.navigate_to_share_room().await,
        Err(SessionError::NotHost)
    );

    assert_eq!(guest.handle.current_frame(), FrameKind::DefaultBlack);
    assert_eq!(guest.handle.phase(), RoomPhase::Waiting);
    assert!(guest.wire_is_quiet().await);
}

#[tokio::test]
async fn test_unseated_peer_cannot_act() {
    init_tracing();

    let peer = ScriptedPeer::start("early").await.expect("start");

    assert_eq!(peer.handle.local_member(), None);
    assert_eq!(peer.handle.toggle_frame().await, Err(SessionError::NotSeated));
    assert_eq!(
        peer.handle.navigate_to_photo_room().await,
        Err(SessionError::NotSeated)
    );
}

#[tokio::test]
async fn test_host_toggles_frame_back_and_forth() {
    init_tracing();

    let mut host = ScriptedPeer::start("host").await.expect("start");
    let roster = vec![member(&host.identity, 0)];
    host.seat(host.identity.id, 4, roster).await.expect("seat");

    assert_eq!(host.handle.toggle_frame().await, Ok(FrameKind::DefaultWhite));
    assert_eq!(host.handle.toggle_frame().await, Ok(FrameKind::DefaultBlack));
    assert_eq!(host.handle.current_frame(), FrameKind::DefaultBlack);
}
