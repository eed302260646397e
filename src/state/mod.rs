//! Animation state and the sequencer that drives it
//!
//! The comedian is always in exactly one of seven display states:
//! - Entering, Standing, Thinking: single poses
//! - PacingRight, PacingLeft: four-frame walk cycles
//! - Talking, Laughing: three-frame gesture cycles
//!
//! The [`Sequencer`] moves between them on timers: the opening
//! choreography, pacing, and the joke cycle.

mod animation;
mod machine;
mod pacing;

pub use animation::AnimationState;
pub use machine::Sequencer;
pub use pacing::{Direction, PacingState};
