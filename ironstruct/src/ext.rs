//! Method-style access to the pack/unpack engines.

use crate::decoder;
use crate::encoder;
use crate::error::{PackError, UnpackError};
use crate::stream::{self, UnpackStream};
use bytes::Bytes;
use ironstruct_core::Value;
use ironstruct_schema::CompiledSchema;
use std::io::{Read, Write};

/// Extension trait adding pack/unpack methods to [`CompiledSchema`].
///
/// Every method forwards to the free function of the same name.
pub trait SchemaExt {
    /// See [`encoder::pack`].
    ///
    /// # Errors
    /// Returns `PackError` if the values do not fit the schema.
    fn pack(&self, values: &[Value]) -> Result<Vec<u8>, PackError>;

    /// See [`encoder::pack_into`].
    ///
    /// # Errors
    /// Returns `PackError` if the values do not fit the schema.
    fn pack_into(
        &self,
        target: &mut Vec<u8>,
        offset: usize,
        values: &[Value],
    ) -> Result<usize, PackError>;

    /// See [`encoder::write_packed`].
    ///
    /// # Errors
    /// Returns `PackError` if packing or writing fails.
    fn write_packed<W: Write>(&self, writer: &mut W, values: &[Value])
    -> Result<usize, PackError>;

    /// See [`decoder::unpack`].
    ///
    /// # Errors
    /// Returns `UnpackError` if the buffer does not match the schema.
    fn unpack(&self, buffer: &[u8]) -> Result<Vec<Value>, UnpackError>;

    /// See [`decoder::unpack_from`].
    ///
    /// # Errors
    /// Returns `UnpackError` if the offset or remaining buffer is invalid.
    fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Vec<Value>, UnpackError>;

    /// See [`decoder::read_unpacked`].
    ///
    /// # Errors
    /// Returns `UnpackError` if reading or decoding fails.
    fn read_unpacked<R: Read>(&self, reader: &mut R) -> Result<Vec<Value>, UnpackError>;

    /// See [`stream::iter_unpack`].
    fn iter_unpack(&self, buffer: impl Into<Bytes>) -> UnpackStream;
}

impl SchemaExt for CompiledSchema {
    fn pack(&self, values: &[Value]) -> Result<Vec<u8>, PackError> {
        encoder::pack(self, values)
    }

    fn pack_into(
        &self,
        target: &mut Vec<u8>,
        offset: usize,
        values: &[Value],
    ) -> Result<usize, PackError> {
        encoder::pack_into(self, target, offset, values)
    }

    fn write_packed<W: Write>(
        &self,
        writer: &mut W,
        values: &[Value],
    ) -> Result<usize, PackError> {
        encoder::write_packed(self, writer, values)
    }

    fn unpack(&self, buffer: &[u8]) -> Result<Vec<Value>, UnpackError> {
        decoder::unpack(self, buffer)
    }

    fn unpack_from(&self, buffer: &[u8], offset: usize) -> Result<Vec<Value>, UnpackError> {
        decoder::unpack_from(self, buffer, offset)
    }

    fn read_unpacked<R: Read>(&self, reader: &mut R) -> Result<Vec<Value>, UnpackError> {
        decoder::read_unpacked(self, reader)
    }

    fn iter_unpack(&self, buffer: impl Into<Bytes>) -> UnpackStream {
        stream::iter_unpack(self, buffer)
    }
}
