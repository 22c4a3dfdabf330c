
pub use scripted_server::*;
