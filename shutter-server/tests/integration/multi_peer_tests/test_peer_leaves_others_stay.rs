use shutter_core::{PeerIdentity, Position, ServerMessage};
use shutter_server::RoomCommand;

use crate::integration::{create_test_room, init_tracing};

#[tokio::test]
async fn test_peer_leaves_others_stay() {
    init_tracing();

    let mut room = create_test_room(4);
    let host = room.host.clone();
    let alice = PeerIdentity::new("alice");
    let bob = PeerIdentity::new("bob");
    let carol = PeerIdentity::new("carol");

    room.join(&host).await.expect("host join failed");
    room.join(&alice).await.expect("alice join failed");
    room.join(&bob).await.expect("bob join failed");
    room.drain().await;

    room.send(RoomCommand::Disconnect { peer_id: alice.id })
        .await
        .expect("disconnect failed");

    let mut notified: Vec<_> = room
        .drain()
        .await
        .into_iter()
        .map(|d| {
            assert!(matches!(d.message, ServerMessage::PeerLeft { .. }));
            d.to
        })
        .collect();
    notified.sort();
    let mut expected = vec![host.id, bob.id];
    expected.sort();
    assert_eq!(notified, expected);

    // The freed seat is the lowest free one, and bob keeps seat 2.
    let ServerMessage::Welcome { member, roster, .. } =
        room.join(&carol).await.expect("carol join failed")
    else {
        panic!("expected Welcome");
    };
    assert_eq!(member.position, Position(1));
    let bob_seat = roster
        .iter()
        .find(|m| m.identity.id == bob.id)
        .map(|m| m.position);
    assert_eq!(bob_seat, Some(Position(2)));
    assert_eq!(roster.len(), 3);
}
