// config.rs

use crate::cli::Args;
use crate::state::Tempo;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 100;
pub const BEATS_PER_MEASURE: u32 = 4;

const ENV_PREFIX: &str = "CLICKTRACK";

/// Wraps failures from the layered configuration sources.
#[derive(Debug)]
pub struct ConfigError(config::ConfigError);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError(err)
    }
}

/// Effective settings after merging defaults, config file, environment and CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tempo: Tempo,
    pub volume: f32,
    pub accent_sample: Option<PathBuf>,
    pub regular_sample: Option<PathBuf>,
    pub output_device: Option<String>,
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tempo: Tempo::default(),
            volume: 1.0,
            accent_sample: None,
            regular_sample: None,
            output_device: None,
            mute: false,
        }
    }
}

/// `$HOME/.config/clicktrack/config.toml`, if `HOME` is set.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("clicktrack")
            .join("config.toml")
    })
}

impl Settings {
    /// Reads the optional config file plus `CLICKTRACK_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("bpm", i64::from(DEFAULT_BPM))?
            .set_default("volume", f64::from(defaults.volume))?
            .set_default("mute", defaults.mute)?;

        if let Some(path) = config_file {
            debug!("Reading config file {:?}", path);
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let raw = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(Self::from_raw(&raw)?)
    }

    fn from_raw(raw: &config::Config) -> Result<Self, config::ConfigError> {
        let bpm = raw.get_int("bpm")?;
        let tempo = Tempo::clamped(bpm);
        if i64::from(tempo.bpm()) != bpm {
            warn!(
                "Configured BPM {} outside {}..={}, using {}",
                bpm, MIN_BPM, MAX_BPM, tempo
            );
        }

        Ok(Settings {
            tempo,
            volume: raw.get_float("volume")? as f32,
            accent_sample: raw.get_string("accent_sample").ok().map(PathBuf::from),
            regular_sample: raw.get_string("regular_sample").ok().map(PathBuf::from),
            output_device: raw.get_string("output_device").ok(),
            mute: raw.get_bool("mute")?,
        })
    }

    /// Command line flags take precedence over every other source.
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(bpm) = args.bpm {
            self.tempo = Tempo::clamped(i64::from(bpm));
        }
        if let Some(volume) = args.volume {
            self.volume = volume;
        }
        if args.accent_sample.is_some() {
            self.accent_sample = args.accent_sample.clone();
        }
        if args.regular_sample.is_some() {
            self.regular_sample = args.regular_sample.clone();
        }
        if args.output_device.is_some() {
            self.output_device = args.output_device.clone();
        }
        self.mute |= args.mute;

        info!("Effective settings: {:?}", self);
        self
    }
}
