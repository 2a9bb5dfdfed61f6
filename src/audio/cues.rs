use super::{AudioError, Result};
use crate::state::Cue;
use log::info;
use std::f32::consts::TAU;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Mono sample data for one click, shared without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickSound {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl ClickSound {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        ClickSound {
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Sine burst with an exponential decay.
    pub fn synthesize(freq: f32, duration_secs: f32, gain: f32) -> Self {
        let sample_rate = DEFAULT_SAMPLE_RATE;
        let num_samples = (sample_rate as f32 * duration_secs) as usize;
        let samples = (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (t * freq * TAU).sin() * (-t * 40.0).exp() * gain
            })
            .collect();
        Self::new(samples, sample_rate)
    }

    pub fn default_accent() -> Self {
        Self::synthesize(1000.0, 0.015, 0.8)
    }

    pub fn default_regular() -> Self {
        Self::synthesize(800.0, 0.012, 0.5)
    }

    /// Decodes a WAV file, averaging all channels down to mono.
    pub fn from_wav(path: &Path) -> Result<Self> {
        let sample_error = |reason: String| AudioError::SampleError {
            path: path.to_path_buf(),
            reason,
        };

        let reader = hound::WavReader::open(path).map_err(|e| sample_error(e.to_string()))?;
        let spec = reader.spec();
        let channels = usize::from(spec.channels.max(1));

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / max_val))
                    .collect::<std::result::Result<Vec<f32>, hound::Error>>()
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<f32>, hound::Error>>(),
        }
        .map_err(|e| sample_error(e.to_string()))?;

        if interleaved.is_empty() {
            return Err(sample_error("file contains no samples".to_string()));
        }

        let mono = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        info!(
            "Loaded {} ({} Hz, {} channel(s))",
            path.display(),
            spec.sample_rate,
            spec.channels
        );
        Ok(Self::new(mono, spec.sample_rate))
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// The accent and regular click, loaded once and never reloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CueBank {
    accent: ClickSound,
    regular: ClickSound,
    volume: f32,
}

impl Default for CueBank {
    fn default() -> Self {
        CueBank {
            accent: ClickSound::default_accent(),
            regular: ClickSound::default_regular(),
            volume: 1.0,
        }
    }
}

impl CueBank {
    pub fn new(accent: ClickSound, regular: ClickSound) -> Self {
        CueBank {
            accent,
            regular,
            volume: 1.0,
        }
    }

    /// Uses the given WAV files, falling back to synthesized clicks where absent.
    pub fn load(accent: Option<&Path>, regular: Option<&Path>) -> Result<Self> {
        let accent = match accent {
            Some(path) => ClickSound::from_wav(path)?,
            None => ClickSound::default_accent(),
        };
        let regular = match regular {
            Some(path) => ClickSound::from_wav(path)?,
            None => ClickSound::default_regular(),
        };
        Ok(Self::new(accent, regular))
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.max(0.0);
        self
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sound(&self, cue: Cue) -> &ClickSound {
        match cue {
            Cue::Accent => &self.accent,
            Cue::Regular => &self.regular,
        }
    }
}
