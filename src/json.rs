//! JSON codec used to marshal request bodies and unmarshal recorded responses

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use crate::error::Error;

/// Serializes `value` into a JSON document.
#[inline]
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, Error> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(JsonError::from_encode_error)
}

/// Deserializes the first JSON document found in `bytes`.
///
/// Anything that follows the first value is left unread, so a body
/// like `{"id":1}\n{"id":2}` decodes as `{"id":1}` and `42oops` as `42`.
/// An empty or whitespace-only input is an error.
pub fn decode_first<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    T::deserialize(&mut de)
        .map_err(JsonError::from_decode_error)
}

/// Deserializes `bytes` as exactly one JSON document.
#[inline]
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes)
        .map_err(JsonError::from_decode_error)
}

struct JsonError;

impl JsonError {
    #[inline]
    fn from_encode_error(err: serde_json::Error) -> Error {
        Error::server_error(format!("JSON serialization error: {err}"))
    }

    #[inline]
    fn from_decode_error(err: serde_json::Error) -> Error {
        Error::client_error(format!("JSON parsing error: {err}"))
    }
}
