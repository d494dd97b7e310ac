//! Compiled, immutable schema.
//!
//! A [`CompiledSchema`] caches everything the pack/unpack engines need so
//! that a format string is parsed exactly once and then reused.

use crate::error::FormatError;
use crate::parser::parse_format;
use ironstruct_core::{ByteOrder, FieldType};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

/// One parsed unit of a format string: a repeat count and a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldGroup {
    count: NonZeroUsize,
    field: FieldType,
}

impl FieldGroup {
    /// Creates a new field group.
    #[must_use]
    pub const fn new(count: NonZeroUsize, field: FieldType) -> Self {
        Self { count, field }
    }

    /// Returns the repeat count (always at least 1).
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count.get()
    }

    /// Returns the field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field
    }

    /// Returns the encoded size of the whole group, or `None` on overflow.
    #[must_use]
    pub const fn encoded_length(&self) -> Option<usize> {
        self.count.get().checked_mul(self.field.size())
    }

    /// Returns the number of logical values the group maps to.
    ///
    /// A byte-string group is a single value regardless of its count.
    #[must_use]
    pub const fn value_count(&self) -> usize {
        if self.field.is_bytes() {
            1
        } else {
            self.count.get()
        }
    }
}

impl std::fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count.get() == 1 {
            write!(f, "{}", self.field.tag())
        } else {
            write!(f, "{}{}", self.count, self.field.tag())
        }
    }
}

/// A compiled format string.
///
/// Immutable after creation; clones share the same storage, so a schema can
/// be handed to several threads at no cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    format: Arc<str>,
    order: ByteOrder,
    groups: Arc<[FieldGroup]>,
    size: usize,
    value_count: usize,
}

impl CompiledSchema {
    /// Compiles a format string.
    ///
    /// # Arguments
    /// * `format` - Format string, e.g. `"<3sf"`
    ///
    /// # Errors
    /// Returns `FormatError` if the string does not match the grammar or its
    /// total size overflows `usize`.
    pub fn compile(format: &str) -> Result<Self, FormatError> {
        let (order, groups) = parse_format(format)?;

        let mut size = 0usize;
        let mut value_count = 0usize;
        for group in &groups {
            size = group
                .encoded_length()
                .and_then(|len| size.checked_add(len))
                .ok_or(FormatError::SizeOverflow)?;
            value_count += group.value_count();
        }

        tracing::debug!(
            "Compiled format {:?}: {:?}, {} groups, {} bytes, {} values",
            format,
            order,
            groups.len(),
            size,
            value_count
        );

        Ok(Self {
            format: Arc::from(format),
            order,
            groups: Arc::from(groups),
            size,
            value_count,
        })
    }

    /// Returns the original format string.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Returns the resolved byte order.
    #[must_use]
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Returns the field groups in declaration order.
    #[must_use]
    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    /// Returns the total encoded size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of logical values.
    #[must_use]
    pub const fn value_count(&self) -> usize {
        self.value_count
    }
}

impl FromStr for CompiledSchema {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl std::fmt::Display for CompiledSchema {
    /// Writes the canonical form: explicit order marker followed by the groups.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.order.marker())?;
        for group in self.groups.iter() {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

/// Computes the encoded size of a format string.
///
/// # Errors
/// Returns `FormatError` if the format string is invalid.
pub fn calc_size(format: &str) -> Result<usize, FormatError> {
    CompiledSchema::compile(format).map(|schema| schema.size())
}
