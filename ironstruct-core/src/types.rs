//! Field type registry and byte order definitions.
//!
//! This module provides the closed set of format characters understood by
//! the format-string compiler, mapping each one to its encoded width, its
//! decoded value kind and a human-readable name.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Field type enumeration, one variant per format character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
    /// Single character (`c`, 1 byte).
    Char,
    /// Signed 8-bit integer (`b`).
    SignedChar,
    /// Unsigned 8-bit integer (`B`).
    UnsignedChar,
    /// Boolean stored in one byte (`?`).
    Bool,
    /// Signed 16-bit integer (`h`).
    Short,
    /// Unsigned 16-bit integer (`H`).
    UnsignedShort,
    /// Signed 32-bit integer (`i`).
    Int,
    /// Unsigned 32-bit integer (`I`).
    UnsignedInt,
    /// Signed 32-bit integer (`l`), same layout as [`FieldType::Int`].
    Long,
    /// Unsigned 32-bit integer (`L`), same layout as [`FieldType::UnsignedInt`].
    UnsignedLong,
    /// Signed 64-bit integer (`q`).
    LongLong,
    /// Unsigned 64-bit integer (`Q`).
    UnsignedLongLong,
    /// IEEE-754 binary16 float (`e`).
    Half,
    /// IEEE-754 binary32 float (`f`).
    Float,
    /// IEEE-754 binary64 float (`d`).
    Double,
    /// Fixed-length byte string (`s`), one byte per repeat unit.
    Bytes,
}

impl FieldType {
    /// Every supported field type, in format-character order.
    pub const ALL: [FieldType; 16] = [
        Self::Char,
        Self::SignedChar,
        Self::UnsignedChar,
        Self::Bool,
        Self::Short,
        Self::UnsignedShort,
        Self::Int,
        Self::UnsignedInt,
        Self::Long,
        Self::UnsignedLong,
        Self::LongLong,
        Self::UnsignedLongLong,
        Self::Half,
        Self::Float,
        Self::Double,
        Self::Bytes,
    ];

    /// Looks up a field type by its format character.
    ///
    /// # Arguments
    /// * `tag` - Format character, e.g. `'I'`
    ///
    /// # Returns
    /// The matching field type, or `None` if the character is not a type tag.
    #[must_use]
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'c' => Some(Self::Char),
            'b' => Some(Self::SignedChar),
            'B' => Some(Self::UnsignedChar),
            '?' => Some(Self::Bool),
            'h' => Some(Self::Short),
            'H' => Some(Self::UnsignedShort),
            'i' => Some(Self::Int),
            'I' => Some(Self::UnsignedInt),
            'l' => Some(Self::Long),
            'L' => Some(Self::UnsignedLong),
            'q' => Some(Self::LongLong),
            'Q' => Some(Self::UnsignedLongLong),
            'e' => Some(Self::Half),
            'f' => Some(Self::Float),
            'd' => Some(Self::Double),
            's' => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Returns the format character for this field type.
    #[must_use]
    pub const fn tag(&self) -> char {
        match self {
            Self::Char => 'c',
            Self::SignedChar => 'b',
            Self::UnsignedChar => 'B',
            Self::Bool => '?',
            Self::Short => 'h',
            Self::UnsignedShort => 'H',
            Self::Int => 'i',
            Self::UnsignedInt => 'I',
            Self::Long => 'l',
            Self::UnsignedLong => 'L',
            Self::LongLong => 'q',
            Self::UnsignedLongLong => 'Q',
            Self::Half => 'e',
            Self::Float => 'f',
            Self::Double => 'd',
            Self::Bytes => 's',
        }
    }

    /// Returns the encoded width of one unit in bytes.
    ///
    /// For [`FieldType::Bytes`] this is the width of a single byte; the group
    /// width is `count` bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Char | Self::SignedChar | Self::UnsignedChar | Self::Bool | Self::Bytes => 1,
            Self::Short | Self::UnsignedShort | Self::Half => 2,
            Self::Int | Self::UnsignedInt | Self::Long | Self::UnsignedLong | Self::Float => 4,
            Self::LongLong | Self::UnsignedLongLong | Self::Double => 8,
        }
    }

    /// Returns the C-style display name of the field type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::SignedChar => "signed char",
            Self::UnsignedChar => "unsigned char",
            Self::Bool => "_Bool",
            Self::Short => "short",
            Self::UnsignedShort => "unsigned short",
            Self::Int => "int",
            Self::UnsignedInt => "unsigned int",
            Self::Long => "long",
            Self::UnsignedLong => "unsigned long",
            Self::LongLong => "long long",
            Self::UnsignedLongLong => "unsigned long long",
            Self::Half => "half",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "char[]",
        }
    }

    /// Returns the kind of value this field decodes to and expects on encode.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Char => ValueKind::Char,
            Self::SignedChar => ValueKind::I8,
            Self::UnsignedChar => ValueKind::U8,
            Self::Bool => ValueKind::Bool,
            Self::Short => ValueKind::I16,
            Self::UnsignedShort => ValueKind::U16,
            Self::Int | Self::Long => ValueKind::I32,
            Self::UnsignedInt | Self::UnsignedLong => ValueKind::U32,
            Self::LongLong => ValueKind::I64,
            Self::UnsignedLongLong => ValueKind::U64,
            Self::Half => ValueKind::F16,
            Self::Float => ValueKind::F32,
            Self::Double => ValueKind::F64,
            Self::Bytes => ValueKind::Bytes,
        }
    }

    /// Returns true if a group of this type forms a single byte-string value.
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a logical value produced by decoding or accepted by encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    /// Single character byte.
    Char,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Boolean.
    Bool,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// 16-bit float.
    F16,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Byte string.
    Bytes,
}

impl ValueKind {
    /// Returns the Rust type name for this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::Bool => "bool",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bytes => "bytes",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order used for multi-byte numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ByteOrder {
    /// Little-endian byte order (default when a format has no marker).
    #[default]
    LittleEndian,
    /// Big-endian byte order.
    BigEndian,
}

impl ByteOrder {
    /// Returns the byte order of the compilation target.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// Resolves a leading order marker of a format string.
    ///
    /// `<` is little-endian, `>` and `!` (network) are big-endian, `=` and `@`
    /// resolve to the target's native order.
    #[must_use]
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '<' => Some(Self::LittleEndian),
            '>' | '!' => Some(Self::BigEndian),
            '=' | '@' => Some(Self::native()),
            _ => None,
        }
    }

    /// Returns true if the character is any order marker.
    #[must_use]
    pub const fn is_marker(c: char) -> bool {
        Self::from_marker(c).is_some()
    }

    /// Returns the canonical marker for this order (`<` or `>`).
    #[must_use]
    pub const fn marker(&self) -> char {
        match self {
            Self::LittleEndian => '<',
            Self::BigEndian => '>',
        }
    }
}
