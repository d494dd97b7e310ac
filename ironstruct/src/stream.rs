//! Streaming unpack.
//!
//! A producer thread decodes the buffer and hands each value to the consumer
//! over a bounded value lane from `ironstruct-channel`. The way the stream
//! ended is reported over a separate [`TerminalSignal`], which the producer
//! fires before it drops its end of the lane, so a consumer that sees the
//! lane close can read the outcome without waiting.

use crate::decoder::ValueDecoder;
use crate::error::UnpackError;
use bytes::Bytes;
use ironstruct_channel::{
    LaneReceiver, LaneSender, SignalReceiver, SignalSender, TerminalSignal, lane,
};
use ironstruct_core::Value;
use ironstruct_schema::CompiledSchema;
use std::thread::{self, JoinHandle};

/// Default number of decoded values buffered between producer and consumer.
pub const DEFAULT_CAPACITY: usize = 64;

/// Default name of the producer thread.
pub const DEFAULT_THREAD_NAME: &str = "ironstruct-unpack";

/// Configures and starts a streaming unpack.
///
/// # Example
/// ```ignore
/// let stream = StreamBuilder::new().capacity(8).strict(false).spawn(&schema, data);
/// ```
#[derive(Debug, Clone)]
pub struct StreamBuilder {
    capacity: usize,
    strict: bool,
    thread_name: String,
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            strict: true,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl StreamBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lane capacity (clamped to at least 1).
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Sets the size policy.
    ///
    /// When strict (the default) the buffer length must equal the schema
    /// size, otherwise the stream yields nothing and ends with
    /// `UnpackError::SizeMismatch`. When lenient, values are yielded while
    /// bytes last; a short buffer ends the stream with
    /// `UnpackError::Truncated` and trailing bytes are ignored.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the producer thread name.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Starts the producer thread and returns the consuming end.
    ///
    /// The schema is cloned (cheap, shared storage) and the buffer is moved
    /// into the producer.
    pub fn spawn(&self, schema: &CompiledSchema, buffer: impl Into<Bytes>) -> UnpackStream {
        let buffer = buffer.into();
        let schema = schema.clone();
        let strict = self.strict;
        let (values_tx, values_rx) = lane(self.capacity);
        let (signal_tx, signal_rx) = TerminalSignal::pair();

        tracing::debug!(
            "Spawning unpack stream for {} ({} bytes, capacity {}, strict {})",
            schema,
            buffer.len(),
            self.capacity,
            strict
        );

        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || produce(&schema, &buffer, strict, &values_tx, signal_tx));

        match spawned {
            Ok(handle) => UnpackStream {
                values: values_rx,
                signal: signal_rx,
                error: None,
                handle: Some(handle),
                done: false,
            },
            Err(e) => {
                tracing::error!("Failed to spawn unpack producer: {}", e);
                UnpackStream {
                    values: values_rx,
                    signal: signal_rx,
                    error: Some(UnpackError::Io(e)),
                    handle: None,
                    done: true,
                }
            }
        }
    }
}

/// Producer loop. Returning drops the lane sender, which ends the stream.
fn produce(
    schema: &CompiledSchema,
    buffer: &[u8],
    strict: bool,
    values: &LaneSender<Value>,
    signal: SignalSender<UnpackError>,
) {
    if strict && buffer.len() != schema.size() {
        tracing::debug!(
            "Rejecting {} byte buffer for {} ({} bytes)",
            buffer.len(),
            schema,
            schema.size()
        );
        report(
            signal,
            UnpackError::SizeMismatch {
                expected: schema.size(),
                actual: buffer.len(),
            },
        );
        return;
    }

    let mut sent = 0usize;
    for item in ValueDecoder::new(schema, buffer) {
        match item {
            Ok(value) => {
                if values.send(value).is_err() {
                    tracing::trace!("Consumer dropped after {} values", sent);
                    return;
                }
                sent += 1;
            }
            Err(e) => {
                tracing::warn!("Unpack stream stopped after {} values: {}", sent, e);
                report(signal, e);
                return;
            }
        }
    }
    tracing::debug!("Unpack stream finished: {} values", sent);
}

fn report(signal: SignalSender<UnpackError>, err: UnpackError) {
    if let Err(err) = signal.fire(err) {
        tracing::trace!("Consumer gone before error could be reported: {}", err);
    }
}

/// Consuming end of a streaming unpack.
///
/// Yields values in declaration order. Once iteration ends, [`error`] or
/// [`finish`] tell whether the whole buffer was decoded. Dropping the stream
/// early disconnects the lane and lets the producer exit.
///
/// [`error`]: UnpackStream::error
/// [`finish`]: UnpackStream::finish
pub struct UnpackStream {
    values: LaneReceiver<Value>,
    signal: SignalReceiver<UnpackError>,
    error: Option<UnpackError>,
    handle: Option<JoinHandle<()>>,
    done: bool,
}

impl UnpackStream {
    /// Returns the error that ended the stream, if any.
    ///
    /// May report an error before every value ahead of it has been consumed.
    pub fn error(&mut self) -> Option<&UnpackError> {
        if self.error.is_none() {
            self.error = self.signal.try_take();
        }
        self.error.as_ref()
    }

    /// Drains the remaining values, waits for the producer and reports the
    /// outcome.
    ///
    /// # Errors
    /// Returns the error that ended the stream early.
    pub fn finish(mut self) -> Result<(), UnpackError> {
        while self.next().is_some() {}
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Unpack producer panicked");
            }
        }
        match self.error.take().or_else(|| self.signal.try_take()) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Collects every value, failing if the stream ended with an error.
    ///
    /// # Errors
    /// Returns the error that ended the stream early.
    pub fn collect_values(mut self) -> Result<Vec<Value>, UnpackError> {
        let values: Vec<Value> = self.by_ref().collect();
        self.finish().map(|()| values)
    }
}

impl Iterator for UnpackStream {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.done {
            return None;
        }
        match self.values.recv() {
            Some(value) => Some(value),
            None => {
                self.done = true;
                if self.error.is_none() {
                    self.error = self.signal.try_take();
                }
                None
            }
        }
    }
}

impl std::iter::FusedIterator for UnpackStream {}

impl std::fmt::Debug for UnpackStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnpackStream")
            .field("buffered", &self.values.len())
            .field("error", &self.error)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Streams the values of `buffer` with default settings.
pub fn iter_unpack(schema: &CompiledSchema, buffer: impl Into<Bytes>) -> UnpackStream {
    StreamBuilder::default().spawn(schema, buffer)
}
