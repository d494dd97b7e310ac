//! Error types for format string parsing.

use thiserror::Error;

/// Error type for format string compilation.
///
/// Positions are character indices into the original format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format contains no field groups.
    #[error("empty format: at least one field group is required")]
    Empty,

    /// A character is neither a digit, whitespace, nor a known type tag.
    #[error("bad char ('{ch}') in struct format at position {position}")]
    BadChar {
        /// Offending character.
        ch: char,
        /// Character position.
        position: usize,
    },

    /// A byte order marker appears after the start of the format.
    #[error("byte order marker '{ch}' at position {position} must start the format")]
    MisplacedOrder {
        /// Offending marker.
        ch: char,
        /// Character position.
        position: usize,
    },

    /// A repeat count is not followed by a type tag.
    #[error("repeat count {count} at position {position} is not followed by a format character")]
    DanglingCount {
        /// The dangling digits.
        count: String,
        /// Position of the first digit.
        position: usize,
    },

    /// A repeat count of zero was given.
    #[error("repeat count at position {position} must be at least 1")]
    ZeroCount {
        /// Position of the first digit.
        position: usize,
    },

    /// A repeat count does not fit in `usize`.
    #[error("repeat count at position {position} is too large")]
    CountOverflow {
        /// Position of the first digit.
        position: usize,
    },

    /// The total encoded size does not fit in `usize`.
    #[error("total struct size overflows")]
    SizeOverflow,
}

impl FormatError {
    /// Creates a bad character error.
    pub fn bad_char(ch: char, position: usize) -> Self {
        Self::BadChar { ch, position }
    }

    /// Creates a dangling count error.
    pub fn dangling(count: impl Into<String>, position: usize) -> Self {
        Self::DanglingCount {
            count: count.into(),
            position,
        }
    }
}
