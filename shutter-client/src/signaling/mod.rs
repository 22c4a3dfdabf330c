mod client;
mod event;

pub use client::*;
pub use event::*;
