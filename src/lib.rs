//! comedy-stage: animation sequencer for a stand-up comedian on a web stage
//!
//! The curtain opens, the comedian walks on, paces, and tells jokes while
//! sprite frames cycle. This crate provides:
//! - The timer-driven sequencer that owns the display state
//! - Joke loading with a built-in fallback list
//! - Presentation cues for an external renderer
//!
//! Scope:
//! - Cues and sound tags only; rendering and audio live elsewhere
//! - NO input handling, persistence or networking

pub mod config;
pub mod events;
pub mod jokes;
pub mod lifecycle;
pub mod schedule;
pub mod stage;
pub mod state;
