//! JSON codec error type.
//!
//! Failures from the underlying JSON engine pass through unchanged; every
//! structural error carries the JSON-pointer path of the offending field.
//! Nothing is retried, recovered, or logged here.

use sertools_core::ValueError;
use thiserror::Error;

use crate::text::TextEncoding;

#[derive(Debug, Error)]
pub enum JsonCodecError {
    /// Surfaced unchanged from the underlying JSON engine.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Byte/string conversion failed under the requested text encoding.
    #[error("text conversion failed under {encoding}")]
    TextConversion { encoding: TextEncoding },
    #[error("expected {expected}, found {found} at {path:?}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing field `{field}` at {path:?}")]
    MissingField { path: String, field: String },
    #[error("non-finite float has no JSON representation at {path:?}")]
    NonFiniteFloat { path: String },
    #[error("invalid blob at {path:?}: {detail}")]
    Blob { path: String, detail: String },
    #[error("invalid timestamp at {path:?}: {detail}")]
    Timestamp { path: String, detail: String },
    #[error(transparent)]
    Value(#[from] ValueError),
}
