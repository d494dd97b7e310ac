//! # IronStruct Core
//!
//! Core types and scalar codec for format-string driven binary packing.
//!
//! This crate provides:
//! - The field type registry ([`FieldType`]) and [`ByteOrder`]
//! - The [`Value`] sum type exchanged with the pack/unpack engines
//! - Byte-order aware encode/decode of every supported field type
//! - Error types for codec operations

pub mod codec;
pub mod error;
pub mod types;
pub mod value;

pub use codec::{decode, decode_bytes, encode, encode_bytes};
pub use error::{CodecError, Result};
pub use half::f16;
pub use types::{ByteOrder, FieldType, ValueKind};
pub use value::Value;
