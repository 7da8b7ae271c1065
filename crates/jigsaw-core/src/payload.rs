use crate::error::PuzzleError;
use crate::piece::PieceId;
use serde::{Deserialize, Serialize};

/// Data-transfer type the payload travels under during a drag
pub const DRAG_PAYLOAD_MIME: &str = "application/json";

/// What a drag carries: the id of the piece being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(alias = "id")]
    pub piece_id: PieceId,
}

impl DragPayload {
    pub fn new(piece_id: PieceId) -> Self {
        Self { piece_id }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a payload read back at drop time
    ///
    /// Empty, non-JSON and out-of-range payloads are all malformed moves.
    pub fn decode(raw: &str) -> Result<Self, PuzzleError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PuzzleError::MalformedMove("empty drag payload".to_string()));
        }
        serde_json::from_str(raw).map_err(|err| PuzzleError::MalformedMove(format!("bad drag payload: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_shape() {
        let payload = DragPayload::new(PieceId::new(7).unwrap());
        assert_eq!(payload.encode(), r#"{"piece_id":7}"#);
        assert_eq!(DragPayload::decode(&payload.encode()).unwrap(), payload);
    }

    #[test]
    fn test_payload_matches_declared_mime() {
        assert_eq!(DRAG_PAYLOAD_MIME, "application/json");
        let raw = DragPayload::new(PieceId::new(0).unwrap()).encode();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn test_decode_accepts_short_key() {
        let payload = DragPayload::decode(r#"{"id": 2}"#).unwrap();
        assert_eq!(payload.piece_id.index(), 2);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for raw in ["", "   ", "not json", "{}", r#"{"piece_id": 9}"#, r#"{"piece_id": "a"}"#] {
            let err = DragPayload::decode(raw).unwrap_err();
            assert!(err.is_move_error(), "{:?} should be a move error", raw);
        }
    }
}
