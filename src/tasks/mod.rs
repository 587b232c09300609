//! Maintenance Tasks Module
//!
//! One-shot maintenance run against a store.
//!
//! # Tasks
//! - Sweep: removes expired entries and reports what remains

mod sweep;

pub use sweep::{run_sweep, SweepReport};
