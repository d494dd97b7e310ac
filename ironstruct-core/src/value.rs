//! Logical values exchanged with the codec.
//!
//! A [`Value`] is one element of the flat sequence produced by unpacking or
//! consumed by packing. Each variant matches exactly one [`ValueKind`].

use crate::error::CodecError;
use crate::types::ValueKind;
use half::f16;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded (or to-be-encoded) logical value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Single character byte (`c`).
    Char(u8),
    /// Signed 8-bit integer (`b`).
    I8(i8),
    /// Unsigned 8-bit integer (`B`).
    U8(u8),
    /// Boolean (`?`).
    Bool(bool),
    /// Signed 16-bit integer (`h`).
    I16(i16),
    /// Unsigned 16-bit integer (`H`).
    U16(u16),
    /// Signed 32-bit integer (`i`, `l`).
    I32(i32),
    /// Unsigned 32-bit integer (`I`, `L`).
    U32(u32),
    /// Signed 64-bit integer (`q`).
    I64(i64),
    /// Unsigned 64-bit integer (`Q`).
    U64(u64),
    /// Half precision float (`e`).
    F16(f16),
    /// Single precision float (`f`).
    F32(f32),
    /// Double precision float (`d`).
    F64(f64),
    /// Fixed-length byte string (`s`).
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Char(_) => ValueKind::Char,
            Self::I8(_) => ValueKind::I8,
            Self::U8(_) => ValueKind::U8,
            Self::Bool(_) => ValueKind::Bool,
            Self::I16(_) => ValueKind::I16,
            Self::U16(_) => ValueKind::U16,
            Self::I32(_) => ValueKind::I32,
            Self::U32(_) => ValueKind::U32,
            Self::I64(_) => ValueKind::I64,
            Self::U64(_) => ValueKind::U64,
            Self::F16(_) => ValueKind::F16,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Returns the byte string, if this is a byte-string value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Consumes the value, returning the byte string if it is one.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a boolean, if it is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Widens any integer or character value to `i64`.
    ///
    /// Returns `None` for non-integers and for `u64` values above `i64::MAX`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Char(v) | Self::U8(v) => Some(i64::from(v)),
            Self::I8(v) => Some(i64::from(v)),
            Self::I16(v) => Some(i64::from(v)),
            Self::U16(v) => Some(i64::from(v)),
            Self::I32(v) => Some(i64::from(v)),
            Self::U32(v) => Some(i64::from(v)),
            Self::I64(v) => Some(v),
            Self::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Widens any floating point value to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F16(v) => Some(v.to_f64()),
            Self::F32(v) => Some(f64::from(v)),
            Self::F64(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{:?}", char::from(*c)),
            Self::I8(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F16(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    i8 => I8,
    u8 => U8,
    bool => Bool,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f16 => F16,
    f32 => F32,
    f64 => F64,
    Vec<u8> => Bytes,
}

impl TryFrom<char> for Value {
    type Error = CodecError;

    /// Accepts characters up to U+00FF, which map to a single byte.
    fn try_from(ch: char) -> Result<Self, Self::Error> {
        u8::try_from(ch)
            .map(Self::Char)
            .map_err(|_| CodecError::CharRange { ch })
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Value {
    fn from(b: [u8; N]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Bytes(s.into_bytes())
    }
}
