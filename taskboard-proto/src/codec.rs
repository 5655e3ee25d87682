//! Textual encoding for persisted boards.
//!
//! Boards are stored and seeded as JSON. The generic [`encode`]/[`decode`]
//! pair is used for any other persisted value.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::board::Board;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value could not be turned into JSON text.
    #[error("encode error: {0}")]
    Encode(String),
    /// The text is not a valid encoding of the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Encodes any serializable value as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decodes a value from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is malformed or has the wrong
/// shape.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encodes a [`Board`] as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_board(board: &Board) -> Result<String, CodecError> {
    encode(board)
}

/// Decodes a [`Board`] from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the text is not a board.
pub fn decode_board(text: &str) -> Result<Board, CodecError> {
    decode(text)
}
