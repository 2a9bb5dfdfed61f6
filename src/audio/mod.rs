//! Click playback
//!
//! This module turns [`Cue`]s into sound:
//! - [`CueBank`] holds the two click samples, loaded once at startup
//! - [`ClickSink`] is the playback seam used by the metronome
//! - [`RodioSink`] plays through an audio output device (feature `audio`)
//! - [`LogSink`] only logs, for muted runs
//! - [`RecordingSink`] records cues for tests
//!
mod cues;
mod error;
pub mod mock_sink;
#[cfg(feature = "audio")]
pub mod rodio_sink;

pub use cues::{ClickSound, CueBank};
pub use error::{AudioError, Result};
pub use mock_sink::RecordingSink;
#[cfg(feature = "audio")]
pub use rodio_sink::{list_output_devices, AudioOutput, RodioSink};

use crate::state::Cue;
use log::info;

/// Fire-and-forget playback of a single cue.
pub trait ClickSink: Send {
    fn play(&mut self, cue: Cue) -> Result<()>;
}

impl<T: ClickSink + ?Sized> ClickSink for Box<T> {
    fn play(&mut self, cue: Cue) -> Result<()> {
        (**self).play(cue)
    }
}

/// Writes each click to the log instead of an audio device.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ClickSink for LogSink {
    fn play(&mut self, cue: Cue) -> Result<()> {
        info!("Click: {:?}", cue);
        Ok(())
    }
}

/// Output device names, or an empty list when none can be enumerated.
#[cfg(feature = "audio")]
pub fn output_devices() -> Vec<String> {
    match list_output_devices() {
        Ok(devices) => devices,
        Err(e) => {
            log::warn!("Could not enumerate output devices: {}", e);
            Vec::new()
        }
    }
}

#[cfg(not(feature = "audio"))]
pub fn output_devices() -> Vec<String> {
    Vec::new()
}
