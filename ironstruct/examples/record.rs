//! Example record codec: pack a sensor reading, unpack it, then stream a batch.
//!
//! Run with: `RUST_LOG=debug cargo run --example record`

use ironstruct::prelude::*;
use tracing_subscriber::EnvFilter;

/// Layout of one reading: station id, flags, name, temperature, pressure.
const READING: &str = "<H?8sfd";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = CompiledSchema::compile(READING)?;
    println!(
        "[Record] {} -> {} bytes, {} values",
        schema,
        schema.size(),
        schema.value_count()
    );

    let reading = vec![
        Value::U16(42),
        Value::Bool(true),
        Value::from("north-01"),
        Value::F32(21.5),
        Value::F64(1013.25),
    ];
    let packed = schema.pack(&reading)?;
    println!("[Record] packed: {:02x?}", packed);

    let decoded = schema.unpack(&packed)?;
    for (index, value) in decoded.iter().enumerate() {
        println!("[Record] value {index}: {value}");
    }

    // Three readings back to back, streamed as one buffer
    let batch_schema = CompiledSchema::compile(&format!("<{}", "H?8sfd".repeat(3)))?;
    let mut batch = Vec::new();
    for station in 0..3u16 {
        let mut values = reading.clone();
        values[0] = Value::U16(station);
        schema.pack_into(&mut batch, usize::from(station) * schema.size(), &values)?;
    }

    let mut stream = StreamBuilder::new()
        .capacity(4)
        .thread_name("record-stream")
        .spawn(&batch_schema, batch);
    let count = stream.by_ref().count();
    stream.finish()?;
    println!("[Record] streamed {count} values");

    Ok(())
}
