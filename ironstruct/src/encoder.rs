//! Pack engine.
//!
//! This module walks a [`CompiledSchema`] against a slice of [`Value`]s and
//! produces the packed byte representation.

use crate::error::PackError;
use ironstruct_core::{CodecError, Value, encode, encode_bytes};
use ironstruct_schema::CompiledSchema;
use std::io::Write;

/// Packs values into a new buffer.
///
/// # Arguments
/// * `schema` - Compiled schema describing the layout
/// * `values` - One value per logical field, in order
///
/// # Returns
/// A buffer of exactly `schema.size()` bytes.
///
/// # Errors
/// Returns `PackError::Arity` if the number of values is wrong, and
/// `PackError::TypeMismatch` / `PackError::StringLength` naming the offending
/// index if a value cannot be encoded. No partial buffer is returned.
pub fn pack(schema: &CompiledSchema, values: &[Value]) -> Result<Vec<u8>, PackError> {
    if values.len() != schema.value_count() {
        return Err(PackError::Arity {
            expected: schema.value_count(),
            actual: values.len(),
        });
    }

    let order = schema.order();
    let mut out = Vec::with_capacity(schema.size());
    let mut index = 0;

    for group in schema.groups() {
        let field = group.field_type();
        if field.is_bytes() {
            let value = &values[index];
            let bytes = value.as_bytes().ok_or_else(|| {
                PackError::at(
                    index,
                    CodecError::TypeMismatch {
                        field,
                        expected: field.kind(),
                        found: value.kind(),
                    },
                )
            })?;
            encode_bytes(bytes, group.count(), &mut out).map_err(|e| PackError::at(index, e))?;
            index += 1;
        } else {
            for value in &values[index..index + group.count()] {
                encode(field, value, order, &mut out).map_err(|e| PackError::at(index, e))?;
                index += 1;
            }
        }
        tracing::trace!("Packed group {} ({} bytes so far)", group, out.len());
    }

    debug_assert_eq!(out.len(), schema.size());
    Ok(out)
}

/// Packs values and writes them into `target` at `offset`.
///
/// The target grows (zero filled) when it is shorter than
/// `offset + schema.size()`. Bytes outside the written range are left as they
/// were, and the target is untouched when packing fails.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Returns any error from [`pack`], or `PackError::OffsetRange` if
/// `offset + schema.size()` overflows.
pub fn pack_into(
    schema: &CompiledSchema,
    target: &mut Vec<u8>,
    offset: usize,
    values: &[Value],
) -> Result<usize, PackError> {
    let end = offset
        .checked_add(schema.size())
        .ok_or(PackError::OffsetRange {
            offset,
            size: schema.size(),
        })?;
    let packed = pack(schema, values)?;

    if target.len() < end {
        target.resize(end, 0);
    }
    target[offset..end].copy_from_slice(&packed);
    Ok(packed.len())
}

/// Packs values and writes them to an [`std::io::Write`] sink.
///
/// # Returns
/// The number of bytes written.
///
/// # Errors
/// Returns any error from [`pack`], or `PackError::Io` if writing fails.
pub fn write_packed<W: Write>(
    schema: &CompiledSchema,
    writer: &mut W,
    values: &[Value],
) -> Result<usize, PackError> {
    let packed = pack(schema, values)?;
    writer.write_all(&packed)?;
    Ok(packed.len())
}
