mod test_peer_leaves_others_stay;
