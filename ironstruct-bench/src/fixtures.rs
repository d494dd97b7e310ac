//! Benchmark fixtures: representative formats and deterministic values.

use ironstruct::PackError;
use ironstruct::encoder::pack;
use ironstruct_core::{FieldType, Value, f16};
use ironstruct_schema::{CompiledSchema, FormatError};

/// A named format string used across benchmarks.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// Benchmark id.
    pub name: &'static str,
    /// Format string.
    pub format: &'static str,
}

/// Formats covering small records, mixed layouts and wide repeat groups.
pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "small",
        format: "<If",
    },
    Fixture {
        name: "mixed",
        format: "<10s2bd",
    },
    Fixture {
        name: "wide",
        format: ">8q8d16s",
    },
    Fixture {
        name: "half",
        format: "<32e",
    },
];

impl Fixture {
    /// Compiles the fixture format.
    ///
    /// # Errors
    /// Returns `FormatError` if the format string is invalid.
    pub fn schema(&self) -> Result<CompiledSchema, FormatError> {
        CompiledSchema::compile(self.format)
    }
}

/// Returns a deterministic value for `field`.
///
/// `width` is the group count, which only matters for byte strings.
#[must_use]
pub fn sample_value(field: FieldType, width: usize, seed: usize) -> Value {
    let letter = |i: usize| b'a' + ((seed + i) % 26) as u8;
    match field {
        FieldType::Char => Value::Char(letter(0)),
        FieldType::SignedChar => Value::I8(seed as i8),
        FieldType::UnsignedChar => Value::U8(seed as u8),
        FieldType::Bool => Value::Bool(seed % 2 == 0),
        FieldType::Short => Value::I16(seed as i16),
        FieldType::UnsignedShort => Value::U16(seed as u16),
        FieldType::Int | FieldType::Long => Value::I32(seed as i32),
        FieldType::UnsignedInt | FieldType::UnsignedLong => Value::U32(seed as u32),
        FieldType::LongLong => Value::I64(-(seed as i64)),
        FieldType::UnsignedLongLong => Value::U64(seed as u64),
        FieldType::Half => Value::F16(f16::from_f32((seed % 64) as f32 * 0.5)),
        FieldType::Float => Value::F32(seed as f32 * 1.25),
        FieldType::Double => Value::F64(seed as f64 * 2.5),
        FieldType::Bytes => Value::Bytes((0..width).map(letter).collect()),
    }
}

/// Returns one value per logical field of `schema`.
#[must_use]
pub fn sample_values(schema: &CompiledSchema) -> Vec<Value> {
    let mut values = Vec::with_capacity(schema.value_count());
    for group in schema.groups() {
        for _ in 0..group.value_count() {
            let seed = values.len();
            values.push(sample_value(group.field_type(), group.count(), seed));
        }
    }
    values
}

/// Packs [`sample_values`] for `schema`.
///
/// # Errors
/// Returns `PackError` if the sample values do not fit the schema.
pub fn sample_buffer(schema: &CompiledSchema) -> Result<Vec<u8>, PackError> {
    pack(schema, &sample_values(schema))
}
