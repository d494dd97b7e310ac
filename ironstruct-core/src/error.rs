//! Error types for IronStruct scalar codec operations.

use crate::types::{FieldType, ValueKind};
use thiserror::Error;

/// Error type for encoding or decoding a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes are available than the field needs.
    #[error("truncated input: required {required} bytes, available {available} bytes")]
    Truncated {
        /// Required size in bytes.
        required: usize,
        /// Available size in bytes.
        available: usize,
    },

    /// The supplied value does not have the kind the field expects.
    #[error("type mismatch for {field} field: expected {expected}, found {found}")]
    TypeMismatch {
        /// Field being encoded.
        field: FieldType,
        /// Kind the field requires.
        expected: ValueKind,
        /// Kind that was supplied.
        found: ValueKind,
    },

    /// A byte string is shorter than its fixed field width.
    #[error("byte string too short: field holds {expected} bytes, got {actual}")]
    StringLength {
        /// Declared field width in bytes.
        expected: usize,
        /// Actual string length in bytes.
        actual: usize,
    },

    /// A character does not fit in the single byte of a `c` field.
    #[error("character {ch:?} (U+{code:04X}) does not fit in a single byte", code = u32::from(*ch))]
    CharRange {
        /// Rejected character.
        ch: char,
    },
}

/// Result type alias for IronStruct codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
