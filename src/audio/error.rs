use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures while loading cues or talking to the audio device.
#[derive(Debug)]
pub enum AudioError {
    /// A cue sample could not be read or decoded
    SampleError { path: PathBuf, reason: String },
    /// The output device could not be found or opened
    DeviceError(String),
    /// Playback of a single click failed
    PlayError(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::SampleError { path, reason } => {
                write!(f, "Cannot load sample {}: {}", path.display(), reason)
            }
            AudioError::DeviceError(msg) => write!(f, "Audio device error: {}", msg),
            AudioError::PlayError(msg) => write!(f, "Audio playback error: {}", msg),
        }
    }
}

impl Error for AudioError {}

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

#[cfg(feature = "audio")]
impl From<rodio::StreamError> for AudioError {
    fn from(err: rodio::StreamError) -> Self {
        AudioError::DeviceError(err.to_string())
    }
}

#[cfg(feature = "audio")]
impl From<rodio::PlayError> for AudioError {
    fn from(err: rodio::PlayError) -> Self {
        AudioError::PlayError(err.to_string())
    }
}

#[cfg(feature = "audio")]
impl From<rodio::cpal::DevicesError> for AudioError {
    fn from(err: rodio::cpal::DevicesError) -> Self {
        AudioError::DeviceError(err.to_string())
    }
}
