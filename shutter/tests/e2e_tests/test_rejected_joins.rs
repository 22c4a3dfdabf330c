use shutter::client::{SessionEvent, UserNotice};
use shutter::model::{PeerIdentity, RoomId, RoomInvite};

use crate::utils::{LiveServer, init_tracing};

#[tokio::test]
async fn test_room_full() -> anyhow::Result<()> {
    init_tracing();

    let server = LiveServer::start(2).await?;
    let (host, invite) = server.host_room("host").await?;
    let guest = server.join(PeerIdentity::new("guest"), &invite).await?;
    guest.wait_for(|s| s.roster.len() == 2).await?;

    let mut extra = server.join(PeerIdentity::new("extra"), &invite).await?;
    let notice = extra
        .wait_for_event(|e| matches!(e, SessionEvent::Notice(_)))
        .await?;
    assert_eq!(
        notice,
        SessionEvent::Notice(UserNotice::RoomFull { capacity: 2 })
    );
    assert!(extra.handle.local_member().is_none());
    // The rejected peer never shows up in the host's roster.
    let seen = host.wait_for(|s| s.roster.len() == 2).await?;
    assert!(!seen.roster.iter().any(|m| m.identity.nickname == "extra"));

    for peer in [host, guest, extra] {
        peer.handle.leave().await;
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_room() -> anyhow::Result<()> {
    init_tracing();

    let server = LiveServer::start(4).await?;
    let invite = RoomInvite {
        room: RoomId::new(),
        link: String::new(),
    };
    let mut lost = server.join(PeerIdentity::new("lost"), &invite).await?;

    let notice = lost
        .wait_for_event(|e| matches!(e, SessionEvent::Notice(_)))
        .await?;
    assert_eq!(notice, SessionEvent::Notice(UserNotice::UnknownRoom));
    assert!(lost.handle.roster().is_empty());

    lost.handle.leave().await;
    Ok(())
}
