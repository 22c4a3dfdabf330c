mod command;
mod handle;
mod session;
mod snapshot;

pub use handle::*;
pub use session::*;
pub use snapshot::*;
