//! Bounded value lane.
//!
//! This module provides an ordered, bounded channel used to hand decoded
//! values from a producer thread to a consumer. A full lane blocks the
//! producer (backpressure); a dropped receiver makes every pending and future
//! send fail, so the producer never blocks on a lane nobody drains.

use crossbeam_channel::{Receiver, Sender, bounded};

/// Creates a new bounded value lane.
///
/// A capacity of zero would turn the lane into a rendezvous channel, so it
/// is raised to one.
///
/// # Arguments
/// * `capacity` - Maximum number of in-flight items
///
/// # Returns
/// A tuple of (sender, receiver).
#[must_use]
pub fn lane<T: Send>(capacity: usize) -> (LaneSender<T>, LaneReceiver<T>) {
    let (sender, receiver) = bounded(capacity.max(1));
    (LaneSender { inner: sender }, LaneReceiver { inner: receiver })
}

/// Producer half of a value lane.
pub struct LaneSender<T> {
    inner: Sender<T>,
}

impl<T> LaneSender<T> {
    /// Blocking send, waiting while the lane is full.
    ///
    /// # Errors
    /// Returns the item if the receiver has been dropped.
    pub fn send(&self, item: T) -> Result<(), T> {
        self.inner.send(item).map_err(|e| e.0)
    }
}

/// Consumer half of a value lane.
pub struct LaneReceiver<T> {
    inner: Receiver<T>,
}

impl<T> LaneReceiver<T> {
    /// Blocking receive.
    ///
    /// # Returns
    /// `Some(item)` if received, `None` once the sender is gone and the lane
    /// is drained.
    pub fn recv(&self) -> Option<T> {
        self.inner.recv().ok()
    }

    /// Returns the number of items currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no items are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
