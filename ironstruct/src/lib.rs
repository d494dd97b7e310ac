//! # IronStruct
//!
//! Format-string driven binary packing and unpacking for Rust, in the style
//! of Python's `struct` module.
//!
//! A format string such as `"<3sf"` is compiled once into an immutable
//! [`CompiledSchema`], which then packs [`Value`]s into bytes and unpacks
//! bytes back into values, either all at once or as a stream fed by a
//! producer thread.
//!
//! ## Features
//!
//! - **Compile once** - schemas are immutable and cheap to clone across threads
//! - **Explicit byte order** - `<`, `>`, `!`, `=` and `@` markers; little-endian by default
//! - **Strict sizes** - packing checks arity and kinds, unpacking checks length
//! - **Streaming unpack** - bounded backpressure with a terminal error signal
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironstruct::prelude::*;
//!
//! let packed = ironstruct::pack(">If", &[Value::U32(6), Value::F32(5.2)])?;
//! assert_eq!(packed, [0, 0, 0, 6, 64, 166, 102, 102]);
//!
//! let schema = CompiledSchema::compile("<10s2bd")?;
//! for value in schema.iter_unpack(data) {
//!     println!("{value}");
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Field types, values and the per-field codec
//! - [`schema`] - Format string parsing and compiled schemas
//! - [`channel`] - Value lane and terminal signal used by streaming unpack

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod ext;
pub mod prelude;
pub mod stream;

/// Field types, values and the per-field codec.
pub mod core {
    pub use ironstruct_core::*;
}

/// Format string parsing and compiled schemas.
pub mod schema {
    pub use ironstruct_schema::*;
}

/// Channels used by streaming unpack.
pub mod channel {
    pub use ironstruct_channel::*;
}

// Re-export commonly used items at the crate root
pub use decoder::{ValueDecoder, read_unpacked};
pub use encoder::write_packed;
pub use error::{Error, PackError, Result, UnpackError};
pub use ext::SchemaExt;
pub use ironstruct_core::{ByteOrder, FieldType, Value, ValueKind, f16};
pub use ironstruct_schema::{CompiledSchema, FieldGroup, FormatError};
pub use stream::{StreamBuilder, UnpackStream};

use bytes::Bytes;

/// Compiles a format string.
///
/// # Errors
/// Returns `Error::Format` if the format string is invalid.
pub fn compile(format: &str) -> Result<CompiledSchema> {
    Ok(CompiledSchema::compile(format)?)
}

/// Returns the encoded size of a format string in bytes.
///
/// # Errors
/// Returns `Error::Format` if the format string is invalid.
pub fn size_of(format: &str) -> Result<usize> {
    Ok(ironstruct_schema::calc_size(format)?)
}

/// Compiles `format` and packs `values`.
///
/// # Errors
/// Returns `Error::Format` or `Error::Pack`.
pub fn pack(format: &str, values: &[Value]) -> Result<Vec<u8>> {
    Ok(encoder::pack(&compile(format)?, values)?)
}

/// Compiles `format` and packs `values` into `target` at `offset`.
///
/// # Errors
/// Returns `Error::Format` or `Error::Pack`.
pub fn pack_into(
    format: &str,
    target: &mut Vec<u8>,
    offset: usize,
    values: &[Value],
) -> Result<usize> {
    Ok(encoder::pack_into(&compile(format)?, target, offset, values)?)
}

/// Compiles `format` and unpacks `buffer`.
///
/// # Errors
/// Returns `Error::Format` or `Error::Unpack`.
pub fn unpack(format: &str, buffer: &[u8]) -> Result<Vec<Value>> {
    Ok(decoder::unpack(&compile(format)?, buffer)?)
}

/// Compiles `format` and unpacks `buffer[offset..]`.
///
/// # Errors
/// Returns `Error::Format` or `Error::Unpack`.
pub fn unpack_from(format: &str, buffer: &[u8], offset: usize) -> Result<Vec<Value>> {
    Ok(decoder::unpack_from(&compile(format)?, buffer, offset)?)
}

/// Compiles `format` and streams the values of `buffer`.
///
/// # Errors
/// Returns `Error::Format` if the format string is invalid. Decoding errors
/// are reported by the returned stream.
pub fn iter_unpack(format: &str, buffer: impl Into<Bytes>) -> Result<UnpackStream> {
    Ok(stream::iter_unpack(&compile(format)?, buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack_known_bytes() {
        assert_eq!(
            pack(">If", &[Value::U32(6), Value::F32(5.2)]).unwrap(),
            vec![0, 0, 0, 6, 64, 166, 102, 102]
        );
        assert_eq!(
            pack(">2IB", &[1u32.into(), 2u32.into(), 3u8.into()]).unwrap(),
            vec![0, 0, 0, 1, 0, 0, 0, 2, 3]
        );
    }

    #[test]
    fn test_size_of() {
        assert_eq!(size_of("<3sf").unwrap(), 7);
        assert_eq!(size_of("<10s2bd").unwrap(), 20);
        assert!(matches!(size_of("3"), Err(Error::Format(_))));
    }

    #[test]
    fn test_errors_are_wrapped() {
        assert!(matches!(pack("<q", &[]), Err(Error::Pack(PackError::Arity { .. }))));
        assert!(matches!(
            unpack("<q", &[0; 4]),
            Err(Error::Unpack(UnpackError::SizeMismatch { .. }))
        ));
        assert!(matches!(iter_unpack("?z", Vec::<u8>::new()), Err(Error::Format(_))));
    }

    #[test]
    fn test_pack_char_field() {
        let letter = Value::try_from('A').unwrap();
        assert_eq!(pack("c", &[letter]).unwrap(), vec![b'A']);
        assert_eq!(unpack("c", &[0xe9]).unwrap(), vec![Value::Char(0xe9)]);

        assert!(matches!(
            Value::try_from('€'),
            Err(ironstruct_core::CodecError::CharRange { ch: '€' })
        ));
        assert!(matches!(
            pack("c", &["€".into()]),
            Err(Error::Pack(PackError::TypeMismatch {
                index: 0,
                tag: 'c',
                ..
            }))
        ));
    }

    #[test]
    fn test_schema_shared_across_threads() {
        let schema = compile(">hI4s").unwrap();

        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8i16)
                .map(|worker| {
                    let schema = schema.clone();
                    scope.spawn(move || {
                        for round in 0..200u32 {
                            let values =
                                vec![Value::I16(worker), Value::U32(round), "wxyz".into()];
                            let packed = schema.pack(&values).unwrap();
                            assert_eq!(packed.len(), schema.size());
                            assert_eq!(schema.unpack(&packed).unwrap(), values);
                        }
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }
        });

        assert_eq!(schema.size(), 10);
    }

    #[test]
    fn test_pack_into_then_unpack_from() {
        let mut buffer = b"hdr".to_vec();
        pack_into("<hH", &mut buffer, 3, &[Value::I16(-5), Value::U16(5)]).unwrap();
        assert_eq!(
            unpack_from("<hH", &buffer, 3).unwrap(),
            vec![Value::I16(-5), Value::U16(5)]
        );
    }

    #[test]
    fn test_iter_unpack_from_format() {
        let values = iter_unpack("<3sf", &b"abcdefg"[..])
            .unwrap()
            .collect_values()
            .unwrap();
        assert_eq!(values, unpack("<3sf", b"abcdefg").unwrap());
    }

    proptest! {
        #[test]
        fn prop_integers_round_trip(
            a in any::<i8>(),
            b in any::<u16>(),
            c in any::<i32>(),
            d in any::<u64>(),
            e in any::<i64>(),
        ) {
            let values = vec![
                Value::I8(a), Value::U16(b), Value::I32(c), Value::U64(d), Value::I64(e),
            ];
            for format in ["<bHiQq", ">bHiQq", "=bHlLq"] {
                let schema = compile(format).unwrap();
                let values = if format.starts_with('=') {
                    vec![
                        Value::I8(a), Value::U16(b), Value::I32(c), Value::U32(d as u32),
                        Value::I64(e),
                    ]
                } else {
                    values.clone()
                };
                let packed = encoder::pack(&schema, &values).unwrap();
                prop_assert_eq!(packed.len(), schema.size());
                prop_assert_eq!(decoder::unpack(&schema, &packed).unwrap(), values);
            }
        }

        #[test]
        fn prop_floats_round_trip(x in -1.0e30f32..1.0e30f32, y in -1.0e300f64..1.0e300f64) {
            let values = vec![Value::F32(x), Value::F64(y)];
            let packed = pack("<fd", &values).unwrap();
            prop_assert_eq!(unpack("<fd", &packed).unwrap(), values);
        }

        #[test]
        fn prop_bytes_round_trip(
            raw in proptest::collection::vec(any::<u8>(), 5),
            flag in any::<bool>(),
        ) {
            let values = vec![Value::Bytes(raw), Value::Bool(flag)];
            let packed = pack("5s?", &values).unwrap();
            prop_assert_eq!(packed.len(), 6);
            prop_assert_eq!(unpack("5s?", &packed).unwrap(), values);
        }

        #[test]
        fn prop_byte_order_mirrors(v in any::<u32>()) {
            let little = pack("<I", &[Value::U32(v)]).unwrap();
            let mut big = pack(">I", &[Value::U32(v)]).unwrap();
            prop_assert_eq!(unpack("<I", &little).unwrap(), vec![Value::U32(v)]);
            prop_assert_eq!(unpack(">I", &big).unwrap(), vec![Value::U32(v)]);
            big.reverse();
            prop_assert_eq!(little, big);
        }

        #[test]
        fn prop_stream_matches_unpack(raw in proptest::collection::vec(any::<u8>(), 13)) {
            let schema = compile("<2h3sIH").unwrap();
            let streamed = schema.iter_unpack(raw.clone()).collect_values().unwrap();
            prop_assert_eq!(streamed, decoder::unpack(&schema, &raw).unwrap());
        }
    }
}
