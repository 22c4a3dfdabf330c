//! Rendezvous server: creates rooms, seats peers and relays their handshakes
//! and room broadcasts over WebSockets.

mod app;
mod config;
mod routes;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use routes::*;
pub use room::*;
pub use signaling::*;
