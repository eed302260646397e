//! Visual states of the comedian

use serde::{Deserialize, Serialize};

/// Sprite frames per walking direction
pub const PACING_FRAMES: usize = 4;
/// Sprite frames for talking and laughing
pub const GESTURE_FRAMES: usize = 3;

/// The seven display states; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Walking in from the wings
    Entering,
    /// Idle at centre stage
    Standing,
    /// Brief pose while pacing
    Thinking,
    PacingRight,
    PacingLeft,
    Talking,
    Laughing,
}

impl AnimationState {
    /// Number of sprite frames cycled while this state is active.
    /// Single poses have none.
    pub fn frame_count(self) -> usize {
        match self {
            AnimationState::Entering | AnimationState::Standing | AnimationState::Thinking => 0,
            AnimationState::PacingRight | AnimationState::PacingLeft => PACING_FRAMES,
            AnimationState::Talking | AnimationState::Laughing => GESTURE_FRAMES,
        }
    }

    pub fn is_animated(self) -> bool {
        self.frame_count() > 0
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::Entering
    }
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationState::Entering => write!(f, "Entering"),
            AnimationState::Standing => write!(f, "Standing"),
            AnimationState::Thinking => write!(f, "Thinking"),
            AnimationState::PacingRight => write!(f, "PacingRight"),
            AnimationState::PacingLeft => write!(f, "PacingLeft"),
            AnimationState::Talking => write!(f, "Talking"),
            AnimationState::Laughing => write!(f, "Laughing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counts() {
        assert_eq!(AnimationState::PacingRight.frame_count(), 4);
        assert_eq!(AnimationState::PacingLeft.frame_count(), 4);
        assert_eq!(AnimationState::Talking.frame_count(), 3);
        assert_eq!(AnimationState::Laughing.frame_count(), 3);
        assert!(!AnimationState::Standing.is_animated());
        assert!(!AnimationState::Thinking.is_animated());
    }

    #[test]
    fn test_default_is_entering() {
        assert_eq!(AnimationState::default(), AnimationState::Entering);
    }
}
