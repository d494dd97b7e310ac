//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironstruct::prelude::*;
//! ```

// Core types
pub use ironstruct_core::{ByteOrder, FieldType, Value, ValueKind, f16};

// Schema types
pub use ironstruct_schema::{CompiledSchema, FieldGroup, FormatError};

// Engines
pub use crate::decoder::ValueDecoder;
pub use crate::error::{Error, PackError, UnpackError};
pub use crate::ext::SchemaExt;
pub use crate::stream::{StreamBuilder, UnpackStream};
