//! # IronStruct Schema
//!
//! Format string compiler.
//!
//! This crate provides:
//! - Parsing of the format mini-language (`"<3sf"`, `">2H?d"`, ...)
//! - [`CompiledSchema`], the immutable precomputed result reused by the engines
//! - Error types for malformed format strings

pub mod error;
pub mod parser;
pub mod schema;

pub use error::FormatError;
pub use parser::parse_format;
pub use schema::{CompiledSchema, FieldGroup, calc_size};
