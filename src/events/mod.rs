//! Events module for presentation changes
//!
//! Every visible change the sequencer makes is expressed as a [`StageCue`]:
//! a flag toggled on a named region, a new joke line, a position update or
//! a sound effect tag. The renderer consumes these cues.

use serde::{Deserialize, Serialize};

use crate::state::AnimationState;

/// Named regions of the stage the renderer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Region {
    CurtainLeft,
    CurtainRight,
    Spotlight,
    /// The comedian wrapper that moves across the stage
    Comedian,
    /// Speech bubble holding the joke text
    JokeBubble,
    /// Pose or animation container for a state
    Pose { state: AnimationState },
    /// A single sprite frame inside an animation container
    Frame { state: AnimationState, index: usize },
}

/// Presentation flags that can be toggled on a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Active,
    CurtainOpen,
    OnStage,
    SpotlightOn,
    Pacing,
}

/// Sound effect tags handed to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    Curtain,
    Footsteps,
    Spotlight,
    Voice,
    Laugh,
}

impl std::fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundEffect::Curtain => write!(f, "curtain"),
            SoundEffect::Footsteps => write!(f, "footsteps"),
            SoundEffect::Spotlight => write!(f, "spotlight"),
            SoundEffect::Voice => write!(f, "voice"),
            SoundEffect::Laugh => write!(f, "laugh"),
        }
    }
}

/// Cues emitted by the sequencer for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageCue {
    /// A flag was switched on or off for a region
    Toggle { region: Region, flag: Flag, on: bool },

    /// Every pose, animation container and sprite frame was deactivated
    ClearPoses,

    /// The speech bubble text changed
    JokeText { text: String },

    /// Horizontal position of the comedian as a percentage of stage width
    Position { left_percent: f32 },

    /// A sound effect should play (stub - no audio in this crate)
    Sound { effect: SoundEffect },
}

impl StageCue {
    pub fn activate(region: Region) -> Self {
        StageCue::Toggle { region, flag: Flag::Active, on: true }
    }

    pub fn deactivate(region: Region) -> Self {
        StageCue::Toggle { region, flag: Flag::Active, on: false }
    }
}

impl std::fmt::Display for StageCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageCue::Toggle { region, flag, on } => {
                let sign = if *on { '+' } else { '-' };
                write!(f, "TOGGLE {:?} {}{:?}", region, sign, flag)
            }
            StageCue::ClearPoses => write!(f, "CLEAR_POSES"),
            StageCue::JokeText { text } => write!(f, "JOKE_TEXT {:?}", text),
            StageCue::Position { left_percent } => write!(f, "POSITION {:.2}%", left_percent),
            StageCue::Sound { effect } => write!(f, "SOUND {}", effect),
        }
    }
}
