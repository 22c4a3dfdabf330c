use shutter::client::{SessionError, SessionEvent};
use shutter::membership::MembershipEvent;
use shutter::model::{PeerIdentity, Position};

use crate::utils::{LiveServer, init_tracing};

#[tokio::test]
async fn test_host_leaves() -> anyhow::Result<()> {
    init_tracing();

    let server = LiveServer::start(4).await?;
    let (host, invite) = server.host_room("host").await?;
    let mut guest = server.join(PeerIdentity::new("guest"), &invite).await?;
    let other = server.join(PeerIdentity::new("other"), &invite).await?;
    for peer in [&host, &guest, &other] {
        peer.wait_for(|s| s.roster.len() == 3).await?;
    }
    let guest_seat = guest.handle.local_member().map(|m| m.position);

    host.handle.leave().await;
    assert!(!host.handle.is_running());

    let host_id = host.identity.id;
    guest
        .wait_for_event(|e| {
            matches!(
                e,
                SessionEvent::Membership(MembershipEvent::MemberLeft(m)) if m.identity.id == host_id
            )
        })
        .await?;
    let snapshot = guest.wait_for(|s| s.roster.len() == 2).await?;
    assert!(snapshot.member_at(Position::HOST).is_none());
    assert_eq!(snapshot.local_member().map(|m| m.position), guest_seat);

    // Nobody is left to drive the room.
    assert_eq!(guest.handle.toggle_frame().await, Err(SessionError::NotHost));
    other.wait_for(|s| s.roster.len() == 2).await?;

    guest.handle.leave().await;
    other.handle.leave().await;
    Ok(())
}
