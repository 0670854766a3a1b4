//! Error types for the text crate.

use thiserror::Error;

/// Errors that can occur when editing styled text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyledTextError {
    /// The range extends past the end of the text.
    #[error("range {start}..{end} out of bounds for text of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// The range start lies after its end.
    #[error("inverted range {start}..{end}")]
    InvertedRange { start: usize, end: usize },
}

/// Result type for styled text operations.
pub type StyledTextResult<T> = Result<T, StyledTextError>;
