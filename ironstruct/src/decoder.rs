//! Unpack engine.
//!
//! This module provides:
//! - [`unpack`] / [`unpack_from`] with a strict size contract
//! - [`read_unpacked`] for [`std::io::Read`] sources
//! - [`ValueDecoder`], the lazy group walker shared with streaming unpack

use crate::error::UnpackError;
use ironstruct_core::{ByteOrder, Value, decode, decode_bytes};
use ironstruct_schema::{CompiledSchema, FieldGroup};
use std::io::Read;

/// Lazily decodes values from a buffer, one logical value per step.
///
/// The decoder does not check the buffer size up front: it yields values
/// while bytes last, and yields a single `UnpackError::Truncated` if the
/// buffer ends inside a field. Trailing bytes are ignored. After an error the
/// decoder is exhausted.
#[derive(Debug, Clone)]
pub struct ValueDecoder<'a> {
    groups: &'a [FieldGroup],
    order: ByteOrder,
    buffer: &'a [u8],
    group: usize,
    unit: usize,
    offset: usize,
    index: usize,
    failed: bool,
}

impl<'a> ValueDecoder<'a> {
    /// Creates a decoder over `buffer` using the layout of `schema`.
    #[must_use]
    pub fn new(schema: &'a CompiledSchema, buffer: &'a [u8]) -> Self {
        Self {
            groups: schema.groups(),
            order: schema.order(),
            buffer,
            group: 0,
            unit: 0,
            offset: 0,
            index: 0,
            failed: false,
        }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset
    }

    /// Returns the logical index of the next value.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buffer[self.offset..]
    }
}

impl Iterator for ValueDecoder<'_> {
    type Item = Result<Value, UnpackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let group = *self.groups.get(self.group)?;
        let field = group.field_type();

        let decoded = if field.is_bytes() {
            decode_bytes(self.remaining(), group.count()).map(|value| (value, group.count()))
        } else {
            decode(field, self.remaining(), self.order).map(|value| (value, field.size()))
        };

        match decoded {
            Ok((value, consumed)) => {
                self.offset += consumed;
                self.unit += 1;
                if field.is_bytes() || self.unit == group.count() {
                    self.group += 1;
                    self.unit = 0;
                }
                self.index += 1;
                Some(Ok(value))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(UnpackError::at(self.index, e)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let left: usize = self.groups[self.group.min(self.groups.len())..]
            .iter()
            .map(FieldGroup::value_count)
            .sum::<usize>()
            .saturating_sub(self.unit);
        (0, Some(left))
    }
}

impl std::iter::FusedIterator for ValueDecoder<'_> {}

/// Unpacks a buffer whose length equals the schema size exactly.
///
/// # Arguments
/// * `schema` - Compiled schema describing the layout
/// * `buffer` - Exactly `schema.size()` bytes
///
/// # Returns
/// `schema.value_count()` values in declaration order.
///
/// # Errors
/// Returns `UnpackError::SizeMismatch` if the buffer is shorter or longer
/// than the schema size.
pub fn unpack(schema: &CompiledSchema, buffer: &[u8]) -> Result<Vec<Value>, UnpackError> {
    if buffer.len() != schema.size() {
        return Err(UnpackError::SizeMismatch {
            expected: schema.size(),
            actual: buffer.len(),
        });
    }

    let mut values = Vec::with_capacity(schema.value_count());
    for value in ValueDecoder::new(schema, buffer) {
        values.push(value?);
    }
    tracing::trace!(
        "Unpacked {} values from {} bytes",
        values.len(),
        buffer.len()
    );
    Ok(values)
}

/// Unpacks `buffer[offset..]`, which must hold exactly `schema.size()` bytes.
///
/// # Errors
/// Returns `UnpackError::OffsetRange` if `offset >= buffer.len()`, otherwise
/// any error from [`unpack`].
pub fn unpack_from(
    schema: &CompiledSchema,
    buffer: &[u8],
    offset: usize,
) -> Result<Vec<Value>, UnpackError> {
    if offset >= buffer.len() {
        return Err(UnpackError::OffsetRange {
            offset,
            len: buffer.len(),
        });
    }
    unpack(schema, &buffer[offset..])
}

/// Reads exactly `schema.size()` bytes from `reader` and unpacks them.
///
/// # Errors
/// Returns `UnpackError::Io` if the reader fails or ends early.
pub fn read_unpacked<R: Read>(
    schema: &CompiledSchema,
    reader: &mut R,
) -> Result<Vec<Value>, UnpackError> {
    let mut buffer = vec![0u8; schema.size()];
    reader.read_exact(&mut buffer)?;
    unpack(schema, &buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn schema(format: &str) -> CompiledSchema {
        CompiledSchema::compile(format).expect("Failed to compile")
    }

    #[test]
    fn test_unpack_string_then_float() {
        let buffer = [97, 98, 99, 100, 101, 102, 103];
        let values = unpack(&schema("<3sf"), &buffer).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Bytes(b"abc".to_vec()),
                Value::F32(f32::from_le_bytes([100, 101, 102, 103]))
            ]
        );
        assert_eq!(
            crate::encoder::pack(&schema("<3sf"), &values).unwrap(),
            buffer.to_vec()
        );
    }

    #[test]
    fn test_unpack_big_endian() {
        let values = unpack(&schema(">If"), &[0, 0, 0, 6, 64, 166, 102, 102]).unwrap();
        assert_eq!(values, vec![Value::U32(6), Value::F32(5.2)]);
    }

    #[test]
    fn test_unpack_repeat_count() {
        let values = unpack(&schema("2B2?"), &[2, 3, 1, 0]).unwrap();
        assert_eq!(
            values,
            vec![Value::U8(2), Value::U8(3), Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn test_unpack_mixed_layout() {
        let buffer: Vec<u8> = (0u8..20).collect();
        let values = unpack(&schema("<10s2bd"), &buffer).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], Value::Bytes((0u8..10).collect()));
        assert_eq!(values[1], Value::I8(10));
        assert_eq!(values[2], Value::I8(11));
        assert_eq!(
            values[3],
            Value::F64(f64::from_le_bytes([12, 13, 14, 15, 16, 17, 18, 19]))
        );
    }

    #[test]
    fn test_unpack_size_mismatch() {
        let s = schema("<3sf");
        for len in [0, 6, 8, 20] {
            let err = unpack(&s, &vec![0u8; len]).unwrap_err();
            assert!(matches!(
                err,
                UnpackError::SizeMismatch { expected: 7, actual } if actual == len
            ));
        }
    }

    #[test]
    fn test_unpack_from_offset() {
        let buffer = [0xaa, 0xbb, 0, 1];
        assert_eq!(
            unpack_from(&schema(">H"), &buffer, 2).unwrap(),
            vec![Value::U16(1)]
        );
        assert!(matches!(
            unpack_from(&schema(">H"), &buffer, 1),
            Err(UnpackError::SizeMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            unpack_from(&schema(">H"), &buffer, 4),
            Err(UnpackError::OffsetRange { offset: 4, len: 4 })
        ));
    }

    #[test]
    fn test_read_unpacked() {
        let mut reader = Cursor::new(vec![1, 0, 0, 0, 9, 9]);
        assert_eq!(
            read_unpacked(&schema("<i"), &mut reader).unwrap(),
            vec![Value::I32(1)]
        );
        assert!(matches!(
            read_unpacked(&schema("<i"), &mut reader),
            Err(UnpackError::Io(_))
        ));
    }

    #[test]
    fn test_value_decoder_truncated() {
        let s = schema("<hI");
        let mut decoder = ValueDecoder::new(&s, &[1, 0, 2, 0]);
        assert_eq!(decoder.next().unwrap().unwrap(), Value::I16(1));
        assert_eq!(decoder.position(), 2);
        match decoder.next() {
            Some(Err(UnpackError::Truncated {
                index,
                required,
                available,
            })) => {
                assert_eq!(index, 1);
                assert_eq!(required, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(decoder.next().is_none());
    }

    #[test]
    fn test_value_decoder_ignores_trailing_bytes() {
        let s = schema("2B");
        let values: Result<Vec<_>, _> = ValueDecoder::new(&s, &[1, 2, 3]).collect();
        assert_eq!(values.unwrap(), vec![Value::U8(1), Value::U8(2)]);
    }
}
