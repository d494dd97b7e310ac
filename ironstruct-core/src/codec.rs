//! Byte-order aware scalar codec.
//!
//! This module provides:
//! - order-aware primitive reads/writes on [`ByteOrder`]
//! - [`decode`] / [`encode`] for a single unit of any [`FieldType`]
//! - [`decode_bytes`] / [`encode_bytes`] for fixed-length byte-string groups

use crate::error::{CodecError, Result};
use crate::types::{ByteOrder, FieldType};
use crate::value::Value;
use half::f16;

macro_rules! ordered_access {
    ($($read:ident, $write:ident, $ty:ty, $n:literal;)*) => {
        impl ByteOrder {
            $(
                #[doc = concat!(
                    "Interprets ", stringify!($n), " bytes as `", stringify!($ty),
                    "` in this byte order."
                )]
                #[inline(always)]
                #[must_use]
                pub fn $read(self, bytes: [u8; $n]) -> $ty {
                    match self {
                        Self::LittleEndian => <$ty>::from_le_bytes(bytes),
                        Self::BigEndian => <$ty>::from_be_bytes(bytes),
                    }
                }

                #[doc = concat!(
                    "Encodes a `", stringify!($ty), "` as ", stringify!($n),
                    " bytes in this byte order."
                )]
                #[inline(always)]
                #[must_use]
                pub fn $write(self, value: $ty) -> [u8; $n] {
                    match self {
                        Self::LittleEndian => value.to_le_bytes(),
                        Self::BigEndian => value.to_be_bytes(),
                    }
                }
            )*
        }
    };
}

ordered_access! {
    read_u16, write_u16, u16, 2;
    read_i16, write_i16, i16, 2;
    read_u32, write_u32, u32, 4;
    read_i32, write_i32, i32, 4;
    read_u64, write_u64, u64, 8;
    read_i64, write_i64, i64, 8;
    read_f32, write_f32, f32, 4;
    read_f64, write_f64, f64, 8;
}

impl ByteOrder {
    /// Interprets 2 bytes as an IEEE-754 binary16 value in this byte order.
    #[inline(always)]
    #[must_use]
    pub fn read_f16(self, bytes: [u8; 2]) -> f16 {
        f16::from_bits(self.read_u16(bytes))
    }

    /// Encodes an IEEE-754 binary16 value as 2 bytes in this byte order.
    #[inline(always)]
    #[must_use]
    pub fn write_f16(self, value: f16) -> [u8; 2] {
        self.write_u16(value.to_bits())
    }
}

/// Copies the first `N` bytes of `bytes` into an array.
#[inline]
fn take<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(CodecError::Truncated {
            required: N,
            available: bytes.len(),
        })
}

/// Decodes one unit of `field` from the front of `bytes`.
///
/// Only the first `field.size()` bytes are read; extra bytes are ignored.
///
/// # Arguments
/// * `field` - Field type to decode
/// * `bytes` - Input bytes, at least `field.size()` long
/// * `order` - Byte order for multi-byte fields
///
/// # Errors
/// Returns [`CodecError::Truncated`] if fewer bytes than the field width are supplied.
pub fn decode(field: FieldType, bytes: &[u8], order: ByteOrder) -> Result<Value> {
    let value = match field {
        FieldType::Char => Value::Char(take::<1>(bytes)?[0]),
        FieldType::SignedChar => Value::I8(i8::from_ne_bytes(take(bytes)?)),
        FieldType::UnsignedChar => Value::U8(take::<1>(bytes)?[0]),
        FieldType::Bool => Value::Bool(take::<1>(bytes)?[0] != 0),
        FieldType::Short => Value::I16(order.read_i16(take(bytes)?)),
        FieldType::UnsignedShort => Value::U16(order.read_u16(take(bytes)?)),
        FieldType::Int | FieldType::Long => Value::I32(order.read_i32(take(bytes)?)),
        FieldType::UnsignedInt | FieldType::UnsignedLong => {
            Value::U32(order.read_u32(take(bytes)?))
        }
        FieldType::LongLong => Value::I64(order.read_i64(take(bytes)?)),
        FieldType::UnsignedLongLong => Value::U64(order.read_u64(take(bytes)?)),
        FieldType::Half => Value::F16(order.read_f16(take(bytes)?)),
        FieldType::Float => Value::F32(order.read_f32(take(bytes)?)),
        FieldType::Double => Value::F64(order.read_f64(take(bytes)?)),
        FieldType::Bytes => decode_bytes(bytes, 1)?,
    };
    Ok(value)
}

/// Decodes a fixed-length byte string of `count` bytes.
///
/// The result is the raw bytes; no terminator is stripped.
///
/// # Errors
/// Returns [`CodecError::Truncated`] if fewer than `count` bytes are supplied.
pub fn decode_bytes(bytes: &[u8], count: usize) -> Result<Value> {
    bytes
        .get(..count)
        .map(|raw| Value::Bytes(raw.to_vec()))
        .ok_or(CodecError::Truncated {
            required: count,
            available: bytes.len(),
        })
}

/// Encodes one unit of `field` and appends it to `out`.
///
/// Nothing is appended when an error is returned.
///
/// # Arguments
/// * `field` - Field type to encode
/// * `value` - Value to encode, must have the field's [`ValueKind`](crate::ValueKind)
/// * `order` - Byte order for multi-byte fields
/// * `out` - Output buffer
///
/// # Errors
/// Returns [`CodecError::TypeMismatch`] if the value kind does not match the field.
pub fn encode(field: FieldType, value: &Value, order: ByteOrder, out: &mut Vec<u8>) -> Result<()> {
    match (field, value) {
        (FieldType::Char, Value::Char(v)) | (FieldType::UnsignedChar, Value::U8(v)) => out.push(*v),
        (FieldType::SignedChar, Value::I8(v)) => out.extend_from_slice(&v.to_ne_bytes()),
        (FieldType::Bool, Value::Bool(v)) => out.push(u8::from(*v)),
        (FieldType::Short, Value::I16(v)) => out.extend_from_slice(&order.write_i16(*v)),
        (FieldType::UnsignedShort, Value::U16(v)) => out.extend_from_slice(&order.write_u16(*v)),
        (FieldType::Int | FieldType::Long, Value::I32(v)) => {
            out.extend_from_slice(&order.write_i32(*v));
        }
        (FieldType::UnsignedInt | FieldType::UnsignedLong, Value::U32(v)) => {
            out.extend_from_slice(&order.write_u32(*v));
        }
        (FieldType::LongLong, Value::I64(v)) => out.extend_from_slice(&order.write_i64(*v)),
        (FieldType::UnsignedLongLong, Value::U64(v)) => {
            out.extend_from_slice(&order.write_u64(*v));
        }
        (FieldType::Half, Value::F16(v)) => out.extend_from_slice(&order.write_f16(*v)),
        (FieldType::Float, Value::F32(v)) => out.extend_from_slice(&order.write_f32(*v)),
        (FieldType::Double, Value::F64(v)) => out.extend_from_slice(&order.write_f64(*v)),
        (FieldType::Bytes, Value::Bytes(b)) => encode_bytes(b, 1, out)?,
        _ => {
            return Err(CodecError::TypeMismatch {
                field,
                expected: field.kind(),
                found: value.kind(),
            });
        }
    }
    Ok(())
}

/// Encodes a fixed-length byte string of exactly `count` bytes.
///
/// Longer input is truncated to `count` bytes. Shorter input is rejected
/// rather than padded.
///
/// # Errors
/// Returns [`CodecError::StringLength`] if `bytes` is shorter than `count`.
pub fn encode_bytes(bytes: &[u8], count: usize, out: &mut Vec<u8>) -> Result<()> {
    let head = bytes.get(..count).ok_or(CodecError::StringLength {
        expected: count,
        actual: bytes.len(),
    })?;
    out.extend_from_slice(head);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    fn encoded(field: FieldType, value: Value, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::new();
        encode(field, &value, order, &mut out).expect("encode failed");
        out
    }

    #[test]
    fn test_ordered_access() {
        assert_eq!(ByteOrder::LittleEndian.read_u16([0x01, 0x02]), 0x0201);
        assert_eq!(ByteOrder::BigEndian.read_u16([0x01, 0x02]), 0x0102);
        assert_eq!(ByteOrder::BigEndian.write_u32(1), [0, 0, 0, 1]);
        assert_eq!(ByteOrder::LittleEndian.write_u32(1), [1, 0, 0, 0]);
        assert_eq!(
            ByteOrder::BigEndian.read_i64([0xff; 8]),
            ByteOrder::LittleEndian.read_i64([0xff; 8])
        );
    }

    #[test]
    fn test_integer_byte_order() {
        assert_eq!(
            encoded(FieldType::UnsignedInt, Value::U32(0x0102_0304), ByteOrder::BigEndian),
            vec![1, 2, 3, 4]
        );
        assert_eq!(
            encoded(FieldType::UnsignedLong, Value::U32(0x0102_0304), ByteOrder::LittleEndian),
            vec![4, 3, 2, 1]
        );
        assert_eq!(
            encoded(FieldType::Short, Value::I16(-2), ByteOrder::BigEndian),
            vec![0xff, 0xfe]
        );
        assert_eq!(
            decode(FieldType::Short, &[0xfe, 0xff], ByteOrder::LittleEndian).unwrap(),
            Value::I16(-2)
        );
        assert_eq!(
            decode(FieldType::UnsignedLongLong, &[0, 0, 0, 0, 0, 0, 1, 0], ByteOrder::BigEndian)
                .unwrap(),
            Value::U64(256)
        );
    }

    #[test]
    fn test_single_byte_fields() {
        assert_eq!(
            decode(FieldType::SignedChar, &[0x80], ByteOrder::BigEndian).unwrap(),
            Value::I8(-128)
        );
        assert_eq!(
            encoded(FieldType::SignedChar, Value::I8(-1), ByteOrder::LittleEndian),
            vec![0xff]
        );
        assert_eq!(
            decode(FieldType::Char, &[b'x'], ByteOrder::LittleEndian).unwrap(),
            Value::Char(b'x')
        );
        assert_eq!(
            decode(FieldType::UnsignedChar, &[200, 1], ByteOrder::LittleEndian).unwrap(),
            Value::U8(200)
        );
    }

    #[test]
    fn test_bool_codec() {
        assert_eq!(encoded(FieldType::Bool, Value::Bool(true), ByteOrder::LittleEndian), vec![1]);
        assert_eq!(encoded(FieldType::Bool, Value::Bool(false), ByteOrder::LittleEndian), vec![0]);
        assert_eq!(
            decode(FieldType::Bool, &[7], ByteOrder::LittleEndian).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            decode(FieldType::Bool, &[0], ByteOrder::LittleEndian).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_float_codec() {
        assert_eq!(
            encoded(FieldType::Float, Value::F32(5.2), ByteOrder::BigEndian),
            vec![64, 166, 102, 102]
        );
        assert_eq!(
            decode(FieldType::Float, &[102, 102, 166, 64], ByteOrder::LittleEndian).unwrap(),
            Value::F32(5.2)
        );
        assert_eq!(
            encoded(FieldType::Double, Value::F64(1.0), ByteOrder::BigEndian),
            vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_half_float_is_binary16() {
        assert_eq!(
            encoded(FieldType::Half, Value::F16(f16::from_f32(1.0)), ByteOrder::BigEndian),
            vec![0x3c, 0x00]
        );
        assert_eq!(
            encoded(FieldType::Half, Value::F16(f16::from_f32(-2.0)), ByteOrder::LittleEndian),
            vec![0x00, 0xc0]
        );
        let decoded = decode(FieldType::Half, &[0x00, 0x3e], ByteOrder::LittleEndian).unwrap();
        assert_eq!(decoded, Value::F16(f16::from_f32(1.5)));
        assert_eq!(decoded.as_f64(), Some(1.5));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(
            decode(FieldType::Double, &[0; 5], ByteOrder::LittleEndian),
            Err(CodecError::Truncated {
                required: 8,
                available: 5
            })
        );
        assert_eq!(
            decode(FieldType::Char, &[], ByteOrder::LittleEndian),
            Err(CodecError::Truncated {
                required: 1,
                available: 0
            })
        );
        assert_eq!(
            decode_bytes(b"ab", 3),
            Err(CodecError::Truncated {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_encode_type_mismatch() {
        let mut out = Vec::new();
        let err = encode(FieldType::Float, &Value::F64(1.0), ByteOrder::LittleEndian, &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                field: FieldType::Float,
                expected: ValueKind::F32,
                found: ValueKind::F64,
            }
        );
        assert!(out.is_empty());

        let err = encode(FieldType::Int, &Value::U32(1), ByteOrder::BigEndian, &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("int"));
    }

    #[test]
    fn test_byte_string_policy() {
        let mut out = Vec::new();
        encode_bytes(b"abcdef", 3, &mut out).unwrap();
        assert_eq!(out, b"abc");

        let err = encode_bytes(b"ab", 3, &mut out).unwrap_err();
        assert_eq!(
            err,
            CodecError::StringLength {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(out, b"abc");

        assert_eq!(decode_bytes(b"abcd", 4).unwrap(), Value::Bytes(b"abcd".to_vec()));
        assert_eq!(decode_bytes(b"a\0c", 3).unwrap(), Value::Bytes(b"a\0c".to_vec()));
    }
}
