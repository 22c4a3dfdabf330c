use shutter_core::{ConnectionError, SendError};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("only the host can do that")]
    NotHost,

    #[error("not seated in the room yet")]
    NotSeated,

    #[error("session has stopped")]
    Closed,
}
