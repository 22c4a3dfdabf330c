use shutter_client::{SessionError, SessionEvent};
use shutter_core::{MembershipError, PeerIdentity, Position, ServerMessage};
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{ScriptedPeer, member};

#[tokio::test]
async fn test_position_conflict_is_fatal() {
    init_tracing();

    let host = PeerIdentity::new("host");
    let mut guest = ScriptedPeer::start("guest").await.expect("start");
    let roster = vec![member(&host, 0), member(&guest.identity, 1)];
    guest.seat(host.id, 4, roster).await.expect("seat");

    // The server claims a stranger holds our seat.
    let intruder = PeerIdentity::new("intruder");
    guest
        .serve(ServerMessage::PeerJoined {
            member: member(&intruder, 1),
        })
        .expect("serve");

    assert_eq!(
        guest.next_event().await.expect("event"),
        SessionEvent::Fatal(MembershipError::PositionConflict {
            position: Position(1),
            holder: guest.identity.id,
        })
    );

    for _ in 0..50 {
        if !guest.handle.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!guest.handle.is_running());
    assert_eq!(guest.handle.toggle_frame().await, Err(SessionError::Closed));
    assert!(guest.link.recv_raw().await.is_none(), "link still open");
}
