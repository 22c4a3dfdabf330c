mod test_host_catches_up_newcomer;
mod test_remote_stickers_converge;
