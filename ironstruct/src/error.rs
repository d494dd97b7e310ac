//! Error types for IronStruct pack/unpack operations.

use ironstruct_core::{CodecError, ValueKind};
use ironstruct_schema::FormatError;
use thiserror::Error;

/// Error type for packing values into bytes.
#[derive(Debug, Error)]
pub enum PackError {
    /// Number of values differs from the schema's logical value count.
    #[error("pack expected {expected} items for packing (got {actual})")]
    Arity {
        /// Logical value count of the schema.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A value does not have the kind its field requires.
    #[error("argument {index} must be {expected} for '{tag}' ({name}), found {found}")]
    TypeMismatch {
        /// Logical index of the offending value.
        index: usize,
        /// Format character of the field.
        tag: char,
        /// Display name of the field type.
        name: &'static str,
        /// Kind the field requires.
        expected: ValueKind,
        /// Kind that was supplied.
        found: ValueKind,
    },

    /// A byte string is shorter than its fixed field width.
    #[error("argument {index}: byte string of {actual} bytes is shorter than width {expected}")]
    StringLength {
        /// Logical index of the offending value.
        index: usize,
        /// Declared field width in bytes.
        expected: usize,
        /// Actual string length in bytes.
        actual: usize,
    },

    /// Any other codec failure at a given logical index.
    #[error("codec error at value {index}: {source}")]
    Codec {
        /// Logical index of the offending value.
        index: usize,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// Target offset cannot hold the packed bytes.
    #[error("offset {offset} out of range for a packed size of {size} bytes")]
    OffsetRange {
        /// Requested offset.
        offset: usize,
        /// Packed size in bytes.
        size: usize,
    },

    /// Writing the packed bytes failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Attaches the logical value index to a codec failure.
    pub(crate) fn at(index: usize, err: CodecError) -> Self {
        match err {
            CodecError::TypeMismatch {
                field,
                expected,
                found,
            } => Self::TypeMismatch {
                index,
                tag: field.tag(),
                name: field.name(),
                expected,
                found,
            },
            CodecError::StringLength { expected, actual } => Self::StringLength {
                index,
                expected,
                actual,
            },
            source @ (CodecError::Truncated { .. } | CodecError::CharRange { .. }) => {
                Self::Codec { index, source }
            }
        }
    }
}

/// Error type for unpacking bytes into values.
#[derive(Debug, Error)]
pub enum UnpackError {
    /// Buffer size differs from the schema's encoded size.
    #[error("unpack requires a buffer of {expected} bytes (got {actual})")]
    SizeMismatch {
        /// Encoded size of the schema.
        expected: usize,
        /// Size of the supplied buffer.
        actual: usize,
    },

    /// Input ended in the middle of a field.
    #[error("truncated input at value {index}: required {required} bytes, available {available}")]
    Truncated {
        /// Logical index of the value being decoded.
        index: usize,
        /// Bytes the field needs.
        required: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// Offset lies outside the buffer.
    #[error("offset {offset} out of range for buffer of {len} bytes")]
    OffsetRange {
        /// Requested offset.
        offset: usize,
        /// Buffer length.
        len: usize,
    },

    /// Any other codec failure at a given logical index.
    #[error("codec error at value {index}: {source}")]
    Codec {
        /// Logical index of the offending value.
        index: usize,
        /// Underlying codec error.
        #[source]
        source: CodecError,
    },

    /// Reading the packed bytes failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnpackError {
    /// Attaches the logical value index to a codec failure.
    pub(crate) fn at(index: usize, err: CodecError) -> Self {
        match err {
            CodecError::Truncated {
                required,
                available,
            } => Self::Truncated {
                index,
                required,
                available,
            },
            source => Self::Codec { index, source },
        }
    }
}

/// Umbrella error returned by the format-string convenience functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The format string is malformed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Packing failed.
    #[error("pack error: {0}")]
    Pack(#[from] PackError),

    /// Unpacking failed.
    #[error("unpack error: {0}")]
    Unpack(#[from] UnpackError),
}

/// Result type alias for the format-string convenience functions.
pub type Result<T> = std::result::Result<T, Error>;
