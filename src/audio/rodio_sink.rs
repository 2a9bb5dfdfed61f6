use super::{AudioError, ClickSink, CueBank, Result};
use crate::state::Cue;
use log::{debug, info};
use rodio::buffer::SamplesBuffer;
use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::{OutputStream, OutputStreamHandle, Source};
use std::sync::Arc;

pub fn list_output_devices() -> Result<Vec<String>> {
    let host = rodio::cpal::default_host();
    Ok(host
        .output_devices()?
        .filter_map(|device| device.name().ok())
        .collect())
}

/// Keeps the output stream open. The stream itself cannot leave the thread
/// that created it, so it stays here while [`RodioSink`]s travel.
pub struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    /// Opens the default device, or the first one whose name contains `device_name`.
    pub fn open(device_name: Option<&str>) -> Result<Self> {
        let (stream, handle) = match device_name {
            None => OutputStream::try_default()?,
            Some(name) => {
                let host = rodio::cpal::default_host();
                let device = host
                    .output_devices()?
                    .find(|d| d.name().map(|n| n.contains(name)).unwrap_or(false))
                    .ok_or_else(|| {
                        AudioError::DeviceError(format!("Output device '{}' not found", name))
                    })?;
                info!("Using output device: {}", device.name().unwrap_or_default());
                OutputStream::try_from_device(&device)?
            }
        };
        Ok(AudioOutput {
            _stream: stream,
            handle,
        })
    }

    pub fn sink(&self, cues: Arc<CueBank>) -> RodioSink {
        RodioSink {
            handle: self.handle.clone(),
            cues,
        }
    }
}

pub struct RodioSink {
    handle: OutputStreamHandle,
    cues: Arc<CueBank>,
}

impl ClickSink for RodioSink {
    fn play(&mut self, cue: Cue) -> Result<()> {
        let sound = self.cues.sound(cue);
        debug!("Playing {:?} cue", cue);
        let source = SamplesBuffer::new(1, sound.sample_rate(), sound.samples().to_vec())
            .amplify(self.cues.volume());
        self.handle.play_raw(source)?;
        Ok(())
    }
}
