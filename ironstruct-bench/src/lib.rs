//! # IronStruct Bench
//!
//! Shared fixtures for the IronStruct benchmarks.

pub mod fixtures;
