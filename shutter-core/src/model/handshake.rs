use crate::codec::base64_payload;
use crate::model::peer::PeerId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// Connection handshake for the media transport. Payloads are opaque: the core
/// routes them and never looks inside.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HandshakeMessage {
    SessionDescription {
        kind: SdpKind,
        #[serde(with = "base64_payload")]
        payload: Bytes,
    },
    ConnectivityCandidate {
        #[serde(with = "base64_payload")]
        payload: Bytes,
    },
}

impl HandshakeMessage {
    pub fn offer(payload: impl Into<Bytes>) -> Self {
        Self::SessionDescription {
            kind: SdpKind::Offer,
            payload: payload.into(),
        }
    }

    pub fn answer(payload: impl Into<Bytes>) -> Self {
        Self::SessionDescription {
            kind: SdpKind::Answer,
            payload: payload.into(),
        }
    }

    pub fn candidate(payload: impl Into<Bytes>) -> Self {
        Self::ConnectivityCandidate {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &Bytes {
        match self {
            Self::SessionDescription { payload, .. } | Self::ConnectivityCandidate { payload } => {
                payload
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(tag = "kind", content = "peer", rename_all = "camelCase")]
pub enum Recipient {
    Peer(PeerId),
    Room,
}
