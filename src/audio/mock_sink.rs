use super::{AudioError, ClickSink, Result};
use crate::state::Cue;
use std::sync::{Arc, Mutex};

/// Records every cue it is asked to play. Clones share the same record.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<Cue>>>,
    failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records the cue and then reports a playback failure.
    pub fn failing() -> Self {
        RecordingSink {
            failing: true,
            ..Self::default()
        }
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.played.lock().unwrap().clear();
    }
}

impl ClickSink for RecordingSink {
    fn play(&mut self, cue: Cue) -> Result<()> {
        self.played.lock().unwrap().push(cue);
        if self.failing {
            return Err(AudioError::PlayError("playback blocked".to_string()));
        }
        Ok(())
    }
}
