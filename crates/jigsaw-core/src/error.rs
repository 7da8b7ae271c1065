use thiserror::Error;

/// Errors raised by the puzzle engine
///
/// None of these are fatal: a failed upload leaves the previous session in
/// place and a rejected move leaves board and tray untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("image encode failed: {0}")]
    Encode(String),
    #[error("invalid image dimensions")]
    Dimensions,
    #[error("malformed move: {0}")]
    MalformedMove(String),
}

impl PuzzleError {
    /// Whether the error came from a gesture rather than from an upload
    pub fn is_move_error(&self) -> bool {
        matches!(self, PuzzleError::MalformedMove(_))
    }
}
