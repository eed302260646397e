//! Timer scheduling for the sequencer
//!
//! Replaces free-floating timeouts and intervals with a single table of
//! cancellable entries owned by the sequencer:
//! - One-shot entries fire once and are removed
//! - Repeating entries fire on a fixed cadence until cancelled

mod timers;

pub use timers::{Scheduler, TimerId};
