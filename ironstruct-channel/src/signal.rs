//! Single-shot terminal signal.
//!
//! A [`TerminalSignal`] carries at most one value, typically the error that
//! ended a producer. The sender half is consumed by [`SignalSender::fire`],
//! so a producer cannot report twice.

use parking_lot::Mutex;
use std::sync::Arc;

/// Terminal signal factory.
pub struct TerminalSignal;

impl TerminalSignal {
    /// Creates a new signal pair.
    #[must_use]
    pub fn pair<T>() -> (SignalSender<T>, SignalReceiver<T>) {
        let state = Arc::new(Mutex::new(SignalState {
            value: None,
            receiver_closed: false,
        }));

        (
            SignalSender {
                state: Arc::clone(&state),
            },
            SignalReceiver { state },
        )
    }
}

struct SignalState<T> {
    value: Option<T>,
    receiver_closed: bool,
}

/// Sender half of a terminal signal.
pub struct SignalSender<T> {
    state: Arc<Mutex<SignalState<T>>>,
}

impl<T> SignalSender<T> {
    /// Fires the signal with a value.
    ///
    /// The value is stored before this call returns, so a consumer that
    /// observes the producer's shutdown afterwards will find it.
    ///
    /// # Errors
    /// Returns the value if the receiver has been dropped.
    pub fn fire(self, value: T) -> Result<(), T> {
        let mut state = self.state.lock();
        if state.receiver_closed {
            return Err(value);
        }
        state.value = Some(value);
        Ok(())
    }
}

/// Receiver half of a terminal signal.
pub struct SignalReceiver<T> {
    state: Arc<Mutex<SignalState<T>>>,
}

impl<T> SignalReceiver<T> {
    /// Takes the signalled value, if one has been fired and not yet taken.
    pub fn try_take(&mut self) -> Option<T> {
        self.state.lock().value.take()
    }
}

impl<T> Drop for SignalReceiver<T> {
    fn drop(&mut self) {
        self.state.lock().receiver_closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fire_and_take() {
        let (tx, mut rx) = TerminalSignal::pair::<u64>();

        assert!(rx.try_take().is_none());
        assert!(tx.fire(42).is_ok());
        assert_eq!(rx.try_take(), Some(42));
        assert_eq!(rx.try_take(), None);
    }

    #[test]
    fn test_sender_dropped_without_firing() {
        let (tx, mut rx) = TerminalSignal::pair::<u64>();
        drop(tx);
        assert!(rx.try_take().is_none());
    }

    #[test]
    fn test_fire_after_receiver_dropped() {
        let (tx, rx) = TerminalSignal::pair::<&str>();
        drop(rx);
        assert_eq!(tx.fire("late"), Err("late"));
    }

    #[test]
    fn test_fire_from_thread() {
        let (tx, mut rx) = TerminalSignal::pair::<String>();
        thread::spawn(move || tx.fire("boom".to_string()))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(rx.try_take().as_deref(), Some("boom"));
    }
}
