//! Value conversion error type.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("integer out of range for {ty}")]
    OutOfRange { ty: &'static str },
    #[error("missing field `{0}`")]
    MissingField(String),
}
