//! Format string parser.
//!
//! This module turns a format string such as `"<3sf"` into its resolved
//! byte order and the ordered sequence of [`FieldGroup`]s.
//!
//! Grammar:
//!
//! ```text
//! format   := order? group+
//! order    := '<' | '>' | '!' | '=' | '@'
//! group    := digits? type_tag
//! ```
//!
//! Whitespace between groups is ignored; a repeat count must be directly
//! followed by its type tag.

use crate::error::FormatError;
use crate::schema::FieldGroup;
use ironstruct_core::{ByteOrder, FieldType};
use std::num::NonZeroUsize;

/// Repeat count being accumulated from consecutive digits.
struct PendingCount {
    position: usize,
    digits: String,
    value: usize,
}

impl PendingCount {
    fn new(position: usize) -> Self {
        Self {
            position,
            digits: String::new(),
            value: 0,
        }
    }

    fn push(&mut self, c: char, digit: u32) -> Result<(), FormatError> {
        self.value = self
            .value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .ok_or(FormatError::CountOverflow {
                position: self.position,
            })?;
        self.digits.push(c);
        Ok(())
    }

    fn finish(self) -> Result<NonZeroUsize, FormatError> {
        NonZeroUsize::new(self.value).ok_or(FormatError::ZeroCount {
            position: self.position,
        })
    }

    fn dangling(self) -> FormatError {
        FormatError::dangling(self.digits, self.position)
    }
}

/// Parses a format string into its byte order and field groups.
///
/// # Arguments
/// * `format` - Format string, e.g. `"<3sf"`
///
/// # Returns
/// The resolved byte order (little-endian when no marker is given) and the
/// field groups in declaration order.
///
/// # Errors
/// Returns `FormatError` if the string is empty, contains an unknown
/// character, has a misplaced order marker, a zero count, or a repeat count
/// with no following type tag.
///
/// Whitespace is only skipped between groups. A repeat count separated from
/// its tag by whitespace (`"3 s"`) is a dangling count, not `"3s"`.
pub fn parse_format(format: &str) -> Result<(ByteOrder, Vec<FieldGroup>), FormatError> {
    let mut chars = format.chars().enumerate().peekable();

    let order = match chars.peek() {
        None => return Err(FormatError::Empty),
        Some(&(_, c)) => match ByteOrder::from_marker(c) {
            Some(order) => {
                chars.next();
                order
            }
            None => ByteOrder::default(),
        },
    };

    let mut groups = Vec::new();
    let mut pending: Option<PendingCount> = None;

    for (position, c) in chars {
        if let Some(digit) = c.to_digit(10) {
            pending
                .get_or_insert_with(|| PendingCount::new(position))
                .push(c, digit)?;
        } else if let Some(field) = FieldType::from_tag(c) {
            let count = match pending.take() {
                Some(p) => p.finish()?,
                None => NonZeroUsize::MIN,
            };
            groups.push(FieldGroup::new(count, field));
        } else if c.is_whitespace() {
            if let Some(p) = pending.take() {
                return Err(p.dangling());
            }
        } else if ByteOrder::is_marker(c) {
            return Err(FormatError::MisplacedOrder { ch: c, position });
        } else {
            return Err(FormatError::bad_char(c, position));
        }
    }

    if let Some(p) = pending {
        return Err(p.dangling());
    }
    if groups.is_empty() {
        return Err(FormatError::Empty);
    }

    Ok((order, groups))
}
