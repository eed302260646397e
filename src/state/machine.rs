//! Core sequencer implementation
//!
//! Owns the display state, the joke cursor and the pacing position, and
//! advances them from timer callbacks. Every visible change goes out
//! through the injected [`Stage`].

use rand::rngs::StdRng;
use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::StageConfig;
use crate::events::{Flag, Region, SoundEffect, StageCue};
use crate::jokes::{Joke, JokeReel};
use crate::schedule::{Scheduler, TimerId};
use crate::stage::Stage;

use super::animation::AnimationState;
use super::pacing::PacingState;

/// Scheduled callbacks the sequencer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    OpenCurtains,
    Enter,
    WalkOn,
    Spotlight,
    StandReady,
    BeginRoutine,
    EndWarmup,
    PacingTick,
    FrameTick,
    JokeTick,
    EndThinking,
    EndInterlude,
}

/// The animation sequencer
pub struct Sequencer<S: Stage> {
    stage: S,
    config: StageConfig,
    jokes: JokeReel,
    rng: StdRng,
    scheduler: Scheduler<Step>,
    /// Time of the callback being handled, or of the last `advance_to`
    clock: Instant,

    state: AnimationState,
    /// Sprite index within the current state's frames
    frame: usize,
    pacing: PacingState,

    started: bool,
    is_pacing: bool,
    is_joking: bool,
    showing_punchline: bool,

    pacing_ticker: Option<TimerId>,
    frame_ticker: Option<TimerId>,
    joke_ticker: Option<TimerId>,
    thinking_timer: Option<TimerId>,
    interlude_timer: Option<TimerId>,
}

impl<S: Stage> Sequencer<S> {
    /// Create a new sequencer. Nothing is shown until [`Sequencer::start`].
    pub fn new(stage: S, jokes: Vec<Joke>, config: StageConfig, rng: StdRng) -> Self {
        let config = config.normalized();
        let pacing = PacingState::centered(config.stage_width, config.pacing_area_ratio);

        Self {
            stage,
            config,
            jokes: JokeReel::new(jokes),
            rng,
            scheduler: Scheduler::new(),
            clock: Instant::now(),
            state: AnimationState::Entering,
            frame: 0,
            pacing,
            started: false,
            is_pacing: false,
            is_joking: false,
            showing_punchline: false,
            pacing_ticker: None,
            frame_ticker: None,
            joke_ticker: None,
            thinking_timer: None,
            interlude_timer: None,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn pacing(&self) -> &PacingState {
        &self.pacing
    }

    pub fn is_pacing(&self) -> bool {
        self.is_pacing
    }

    pub fn is_joking(&self) -> bool {
        self.is_joking
    }

    pub fn is_showing_punchline(&self) -> bool {
        self.showing_punchline
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn clock(&self) -> Instant {
        self.clock
    }

    /// Number of callbacks still waiting to fire
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Begin the opening choreography. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.started {
            warn!("show already started");
            return;
        }
        self.started = true;

        info!(
            routine_in_ms = self.config.opening.total().as_millis() as u64,
            "show starting"
        );
        self.schedule(self.config.opening.curtains, Step::OpenCurtains);
    }

    /// Cancel every outstanding callback and ticker.
    /// Returns how many were cancelled; a second call returns 0.
    pub fn stop(&mut self) -> usize {
        let cancelled = self.scheduler.cancel_all();

        self.pacing_ticker = None;
        self.frame_ticker = None;
        self.joke_ticker = None;
        self.thinking_timer = None;
        self.interlude_timer = None;
        self.is_pacing = false;
        self.is_joking = false;

        if cancelled > 0 {
            info!(cancelled, "sequencer stopped");
        }
        cancelled
    }

    /// Fire every callback due at or before `now`
    pub fn advance_to(&mut self, now: Instant) -> usize {
        let mut fired = 0;

        while let Some((due, _, step)) = self.scheduler.pop_due(now) {
            // Chained delays count from the deadline, not from `now`
            self.clock = self.clock.max(due);
            self.dispatch(step);
            fired += 1;
        }

        self.clock = self.clock.max(now);
        fired
    }

    /// Drive the sequencer on the tokio clock until nothing is scheduled
    pub async fn run(&mut self) {
        info!("sequencer running");

        while let Some(deadline) = self.scheduler.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            let fired = self.advance_to(Instant::now());
            debug!(fired, "timers fired");
        }

        info!("sequencer idle, nothing scheduled");
    }

    /// Switch the visible state. A no-op when already in `state`.
    pub fn set_state(&mut self, state: AnimationState) {
        if self.state == state {
            return;
        }
        self.show_state(state);
    }

    /// Deactivate everything and show `state` from its first frame
    fn show_state(&mut self, state: AnimationState) {
        debug!(from = %self.state, to = %state, "state transition");

        self.state = state;
        self.frame = 0;

        self.stage.apply(StageCue::ClearPoses);
        self.stage.apply(StageCue::activate(Region::Pose { state }));
        if state.is_animated() {
            self.stage
                .apply(StageCue::activate(Region::Frame { state, index: 0 }));
        }
    }

    pub fn start_pacing(&mut self) {
        if self.is_pacing {
            return;
        }
        self.is_pacing = true;

        self.toggle(Region::Comedian, Flag::Pacing, true);
        self.pacing.reset();
        self.update_position();
        self.set_state(self.pacing.direction.pose());
        self.start_frame_animation();

        let id = self
            .scheduler
            .every(self.clock, self.config.pacing_tick, Step::PacingTick);
        self.pacing_ticker = Some(id);

        debug!(position = self.pacing.position, "pacing started");
    }

    pub fn stop_pacing(&mut self) {
        self.is_pacing = false;
        if let Some(id) = self.pacing_ticker.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.thinking_timer.take() {
            self.scheduler.cancel(id);
        }

        self.toggle(Region::Comedian, Flag::Pacing, false);
        self.stage.apply(StageCue::Position { left_percent: 50.0 });

        self.stop_frame_animation();
        self.set_state(AnimationState::Standing);

        debug!("pacing stopped");
    }

    /// One motion step: move, turn at the edges, maybe stop to think
    fn pace(&mut self) {
        if !self.is_pacing {
            return;
        }

        if let Some(direction) = self.pacing.step(self.config.pacing_speed) {
            debug!(?direction, position = self.pacing.position, "pacing turned");
            // While thinking the pose is restored when the thought ends
            if self.thinking_timer.is_none() {
                self.set_state(direction.pose());
            }
        }

        self.update_position();

        if self.thinking_timer.is_none() && self.rng.random_bool(self.config.thinking_chance) {
            debug!("thinking");
            self.set_state(AnimationState::Thinking);
            let id = self.schedule(self.config.thinking_duration, Step::EndThinking);
            self.thinking_timer = Some(id);
        }
    }

    fn end_thinking(&mut self) {
        self.thinking_timer = None;
        if self.is_pacing && self.state == AnimationState::Thinking {
            self.set_state(self.pacing.direction.pose());
        }
    }

    fn update_position(&mut self) {
        let width = self.config.stage_width;
        let left_percent = if width > 0.0 {
            self.pacing.position / width * 100.0
        } else {
            50.0
        };
        self.stage.apply(StageCue::Position { left_percent });
    }

    /// Recompute pacing bounds for a new stage width
    pub fn resize(&mut self, stage_width: f32) {
        if !stage_width.is_finite() {
            warn!(stage_width, "ignoring non-finite stage width");
            return;
        }
        self.config.stage_width = stage_width.max(0.0);
        let bounds = PacingState::bounds_for(self.config.stage_width, self.config.pacing_area_ratio);
        self.pacing.rebound(bounds);

        debug!(stage_width, ?bounds, "stage resized");

        if self.is_pacing {
            self.update_position();
        }
    }

    pub fn start_frame_animation(&mut self) {
        if self.frame_ticker.is_some() {
            return;
        }
        let id = self
            .scheduler
            .every(self.clock, self.config.frame_period, Step::FrameTick);
        self.frame_ticker = Some(id);
    }

    pub fn stop_frame_animation(&mut self) {
        if let Some(id) = self.frame_ticker.take() {
            self.scheduler.cancel(id);
        }
        self.frame = 0;
    }

    fn advance_frame(&mut self) {
        let count = self.state.frame_count();
        if count == 0 {
            return;
        }

        let state = self.state;
        self.stage
            .apply(StageCue::deactivate(Region::Frame { state, index: self.frame }));
        self.frame = (self.frame + 1) % count;
        self.stage
            .apply(StageCue::activate(Region::Frame { state, index: self.frame }));
    }

    /// Tell the first setup and start the five-second joke cycle
    pub fn start_joke_routine(&mut self) {
        if self.jokes.is_empty() {
            warn!("joke routine starting without any jokes");
        } else {
            info!(jokes = self.jokes.len(), "joke routine starting");
        }
        self.is_joking = true;
        self.display_next_joke();

        if self.joke_ticker.is_none() {
            let id = self
                .scheduler
                .every(self.clock, self.config.joke_period, Step::JokeTick);
            self.joke_ticker = Some(id);
        }
    }

    fn joke_tick(&mut self) {
        if !self.is_joking {
            return;
        }

        if !self.showing_punchline {
            self.display_punchline();
        } else if self.rng.random_bool(self.config.interlude_chance) {
            self.begin_interlude();
        } else {
            self.display_next_joke();
        }
    }

    /// Show the next setup line
    pub fn display_next_joke(&mut self) {
        let Some(text) = self.jokes.next_setup().map(|joke| joke.text.clone()) else {
            warn!(jokes = self.jokes.len(), "no setup lines to tell");
            return;
        };

        info!(cursor = self.jokes.cursor(), %text, "setup");
        self.stage.apply(StageCue::JokeText { text });
        self.stage.apply(StageCue::activate(Region::JokeBubble));
        self.set_state(AnimationState::Talking);
        self.showing_punchline = false;

        self.start_frame_animation();
        self.play_sound_effect(SoundEffect::Voice);
    }

    /// Show the punchline under the cursor, or move on to the next setup
    pub fn display_punchline(&mut self) {
        let Some(text) = self.jokes.take_punchline().map(|joke| joke.text.clone()) else {
            debug!(cursor = self.jokes.cursor(), "no punchline under cursor");
            self.display_next_joke();
            return;
        };

        info!(%text, "punchline");
        self.stage.apply(StageCue::JokeText { text });
        self.set_state(AnimationState::Laughing);
        self.showing_punchline = true;

        // Restart so the laugh begins on a fresh frame period
        self.stop_frame_animation();
        self.start_frame_animation();
        self.play_sound_effect(SoundEffect::Laugh);
    }

    /// Pace between jokes; the joke cycle is paused until it ends
    fn begin_interlude(&mut self) {
        if self.interlude_timer.is_some() {
            return;
        }
        info!(
            duration_ms = self.config.interlude_duration.as_millis() as u64,
            "pacing between jokes"
        );
        self.is_joking = false;
        self.stage.apply(StageCue::deactivate(Region::JokeBubble));
        self.stop_frame_animation();
        self.start_pacing();

        let id = self.schedule(self.config.interlude_duration, Step::EndInterlude);
        self.interlude_timer = Some(id);
    }

    fn end_interlude(&mut self) {
        self.interlude_timer = None;
        self.stop_pacing();
        self.is_joking = true;
        self.display_next_joke();
    }

    /// Hand a sound tag to the audio collaborator. No audio is played here.
    pub fn play_sound_effect(&mut self, effect: SoundEffect) {
        info!(%effect, "playing sound effect");
        self.stage.apply(StageCue::Sound { effect });
    }

    fn dispatch(&mut self, step: Step) {
        match step {
            Step::OpenCurtains => {
                info!("curtains opening");
                self.toggle(Region::CurtainLeft, Flag::CurtainOpen, true);
                self.toggle(Region::CurtainRight, Flag::CurtainOpen, true);
                self.play_sound_effect(SoundEffect::Curtain);
                self.schedule(self.config.opening.enter, Step::Enter);
            }
            Step::Enter => {
                info!("comedian entering");
                // Entering is the initial state, so show it unconditionally
                self.show_state(AnimationState::Entering);
                self.schedule(self.config.opening.walk_on, Step::WalkOn);
            }
            Step::WalkOn => {
                self.toggle(Region::Comedian, Flag::OnStage, true);
                self.play_sound_effect(SoundEffect::Footsteps);
                self.schedule(self.config.opening.spotlight, Step::Spotlight);
            }
            Step::Spotlight => {
                self.toggle(Region::Spotlight, Flag::SpotlightOn, true);
                self.play_sound_effect(SoundEffect::Spotlight);
                self.schedule(self.config.opening.stand, Step::StandReady);
            }
            Step::StandReady => {
                self.set_state(AnimationState::Standing);
                self.schedule(self.config.opening.routine, Step::BeginRoutine);
            }
            Step::BeginRoutine => {
                info!("routine starting with a warm-up walk");
                self.start_pacing();
                self.schedule(self.config.warmup_duration, Step::EndWarmup);
            }
            Step::EndWarmup => {
                self.stop_pacing();
                self.start_joke_routine();
            }
            Step::PacingTick => self.pace(),
            Step::FrameTick => self.advance_frame(),
            Step::JokeTick => self.joke_tick(),
            Step::EndThinking => self.end_thinking(),
            Step::EndInterlude => self.end_interlude(),
        }
    }

    fn schedule(&mut self, delay: std::time::Duration, step: Step) -> TimerId {
        self.scheduler.after(self.clock, delay, step)
    }

    fn toggle(&mut self, region: Region, flag: Flag, on: bool) {
        self.stage.apply(StageCue::Toggle { region, flag, on });
    }
}
