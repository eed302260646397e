//! Horizontal pacing geometry

use super::animation::AnimationState;

/// Walking direction across the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Pose that faces this direction
    pub fn pose(self) -> AnimationState {
        match self {
            Direction::Left => AnimationState::PacingLeft,
            Direction::Right => AnimationState::PacingRight,
        }
    }
}

/// Position and heading of the comedian inside the pacing area
#[derive(Debug, Clone, PartialEq)]
pub struct PacingState {
    pub direction: Direction,
    pub position: f32,
    /// Inclusive `[min, max]` range the position stays within
    pub bounds: (f32, f32),
}

impl PacingState {
    /// Pacing area centred on the stage, covering `area_ratio` of its width
    pub fn centered(stage_width: f32, area_ratio: f32) -> Self {
        let bounds = Self::bounds_for(stage_width, area_ratio);
        Self {
            direction: Direction::Right,
            position: bounds.0,
            bounds,
        }
    }

    pub fn bounds_for(stage_width: f32, area_ratio: f32) -> (f32, f32) {
        let half_area = stage_width * area_ratio / 2.0;
        let center = stage_width / 2.0;
        (center - half_area, center + half_area)
    }

    /// Back to the left edge, heading right
    pub fn reset(&mut self) {
        self.direction = Direction::Right;
        self.position = self.bounds.0;
    }

    /// Replace the bounds and pull the position back inside them
    pub fn rebound(&mut self, bounds: (f32, f32)) {
        self.bounds = bounds;
        self.position = self.position.clamp(bounds.0, bounds.1);
    }

    /// Move one step. Returns the new direction when a boundary was reached.
    pub fn step(&mut self, speed: f32) -> Option<Direction> {
        let (min, max) = self.bounds;
        match self.direction {
            Direction::Right => {
                self.position += speed;
                if self.position >= max {
                    self.position = max;
                    self.direction = Direction::Left;
                    return Some(Direction::Left);
                }
            }
            Direction::Left => {
                self.position -= speed;
                if self.position <= min {
                    self.position = min;
                    self.direction = Direction::Right;
                    return Some(Direction::Right);
                }
            }
        }
        None
    }
}
