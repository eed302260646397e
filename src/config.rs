//! Configuration loading and management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the joke list
    pub jokes_path: PathBuf,

    /// Seed for the show's random choices; OS-seeded when unset
    pub seed: Option<u64>,

    /// Timing and motion settings for the sequencer
    pub stage: StageConfig,
}

/// Timing and motion settings for the sequencer
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Stage width in pixels; pacing bounds derive from it
    pub stage_width: f32,
    /// Share of the stage width used for pacing, centred
    pub pacing_area_ratio: f32,
    /// Pixels moved per pacing tick
    pub pacing_speed: f32,
    /// Interval between pacing ticks (one display frame)
    pub pacing_tick: Duration,
    /// Chance per pacing tick of a thinking pose
    pub thinking_chance: f64,
    pub thinking_duration: Duration,
    /// Interval between sprite frames
    pub frame_period: Duration,
    /// Interval between joke cycle ticks
    pub joke_period: Duration,
    /// Chance after a punchline of pacing before the next joke
    pub interlude_chance: f64,
    pub interlude_duration: Duration,
    /// Pacing before the first joke
    pub warmup_duration: Duration,
    /// Delays of the opening choreography
    pub opening: OpeningTimeline,
}

/// Relative delays between the steps of the opening
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningTimeline {
    /// From `start()` until the curtains open
    pub curtains: Duration,
    /// Curtains open until the comedian appears
    pub enter: Duration,
    /// Comedian appears until he reaches centre stage
    pub walk_on: Duration,
    /// Centre stage until the spotlight comes on
    pub spotlight: Duration,
    /// Spotlight until the comedian stands ready
    pub stand: Duration,
    /// Standing until the routine begins
    pub routine: Duration,
}

impl Default for OpeningTimeline {
    fn default() -> Self {
        Self {
            curtains: Duration::from_millis(1000),
            enter: Duration::from_millis(1500),
            walk_on: Duration::from_millis(1000),
            spotlight: Duration::from_millis(800),
            stand: Duration::from_millis(500),
            routine: Duration::from_millis(1000),
        }
    }
}

impl OpeningTimeline {
    /// Time from `start()` until the routine begins
    pub fn total(&self) -> Duration {
        self.curtains + self.enter + self.walk_on + self.spotlight + self.stand + self.routine
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            stage_width: 1280.0,
            pacing_area_ratio: 0.7,
            pacing_speed: 3.0,
            pacing_tick: Duration::from_millis(16),
            thinking_chance: 0.005,
            thinking_duration: Duration::from_millis(1000),
            frame_period: Duration::from_millis(150),
            joke_period: Duration::from_millis(5000),
            interlude_chance: 0.3,
            interlude_duration: Duration::from_millis(8000),
            warmup_duration: Duration::from_millis(8000),
            opening: OpeningTimeline::default(),
        }
    }
}

impl StageConfig {
    /// Clamp probabilities, ratios and distances into range.
    /// Non-finite values fall back to their defaults.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        self.thinking_chance =
            finite_or(self.thinking_chance, defaults.thinking_chance).clamp(0.0, 1.0);
        self.interlude_chance =
            finite_or(self.interlude_chance, defaults.interlude_chance).clamp(0.0, 1.0);
        self.pacing_area_ratio =
            finite_or(self.pacing_area_ratio, defaults.pacing_area_ratio).clamp(0.0, 1.0);
        self.pacing_speed = finite_or(self.pacing_speed, defaults.pacing_speed).max(0.0);
        self.stage_width = finite_or(self.stage_width, defaults.stage_width).max(0.0);
        self
    }
}

fn finite_or<T: Into<f64> + Copy>(value: T, default: T) -> T {
    if value.into().is_finite() {
        value
    } else {
        default
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jokes_path = lookup("COMEDY_JOKES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets").join("dad_jokes.json"));

        let seed = lookup("COMEDY_SEED")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .context("COMEDY_SEED must be an unsigned integer")?;

        let mut stage = StageConfig::default();
        if let Some(raw) = lookup("COMEDY_STAGE_WIDTH") {
            stage.stage_width = raw
                .trim()
                .parse::<f32>()
                .context("COMEDY_STAGE_WIDTH must be a number")?;
            if !stage.stage_width.is_finite() {
                anyhow::bail!("COMEDY_STAGE_WIDTH must be finite, got {}", raw.trim());
            }
        }

        Ok(Self {
            jokes_path,
            seed,
            stage: stage.normalized(),
        })
    }
}
