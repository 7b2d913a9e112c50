use thiserror::Error;

use crate::figure::FigureKind;

/// Errors that can occur while decoding figures from a document or clipboard payload
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed figure data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Figure #{index} ({kind:?}) is missing required field `{field}`")]
    MissingField {
        index: usize,
        kind: FigureKind,
        field: &'static str,
    },

    #[error("Figure #{index} has an invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
