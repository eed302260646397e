//! Renderer capability handed to the sequencer
//!
//! The sequencer never touches a display directly. It is given a [`Stage`]
//! and pushes [`StageCue`]s into it; the binary forwards them over a
//! broadcast channel, tests record them.

use tokio::sync::broadcast;
use tracing::trace;

use crate::events::StageCue;

/// Anything that can present stage cues
pub trait Stage {
    fn apply(&mut self, cue: StageCue);
}

/// Stage that broadcasts every cue to subscribed renderers
pub struct ChannelStage {
    cue_tx: broadcast::Sender<StageCue>,
}

impl ChannelStage {
    pub fn new(cue_tx: broadcast::Sender<StageCue>) -> Self {
        Self { cue_tx }
    }
}

impl Stage for ChannelStage {
    fn apply(&mut self, cue: StageCue) {
        trace!(%cue, "emitting cue");
        // No subscribers just means nobody is watching
        let _ = self.cue_tx.send(cue);
    }
}

/// Stage that keeps every cue in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingStage {
    pub cues: Vec<StageCue>,
}

#[cfg(test)]
impl RecordingStage {
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn contains(&self, cue: &StageCue) -> bool {
        self.cues.contains(cue)
    }
}

#[cfg(test)]
impl Stage for RecordingStage {
    fn apply(&mut self, cue: StageCue) {
        self.cues.push(cue);
    }
}
