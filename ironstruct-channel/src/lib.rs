//! # IronStruct Channel
//!
//! Producer/consumer plumbing for streaming unpack.
//!
//! This crate provides:
//! - [`lane`] - Bounded, ordered value lane with backpressure
//! - [`signal`] - Single-shot terminal signal carrying at most one error

pub mod lane;
pub mod signal;

pub use lane::{LaneReceiver, LaneSender, lane};
pub use signal::{SignalReceiver, SignalSender, TerminalSignal};
