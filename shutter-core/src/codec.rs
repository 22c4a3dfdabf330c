//! JSON wire codec for signaling frames.
//!
//! Every frame is one text message on the signaling channel. Handshake
//! payloads are opaque bytes and travel as standard base64 strings.

use crate::error::{DecodeError, SendError};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn encode<T: Serialize>(message: &T) -> Result<String, SendError> {
    serde_json::to_string(message).map_err(|e| SendError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(frame: &str) -> Result<T, DecodeError> {
    serde_json::from_str(frame).map_err(|e| DecodeError {
        reason: e.to_string(),
        len: frame.len(),
    })
}

pub(crate) mod base64_payload {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(payload: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
