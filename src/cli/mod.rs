use crate::config::{MAX_BPM, MIN_BPM};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal metronome with an accented downbeat", long_about = None)]
pub struct Args {
    /// Initial tempo in beats per minute
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_BPM)..=i64::from(MAX_BPM)))]
    pub bpm: Option<u32>,

    /// Start playing immediately and show progress bars instead of the interactive view
    #[arg(long)]
    pub headless: bool,

    /// Log clicks instead of playing them
    #[arg(long)]
    pub mute: bool,

    /// List available audio output devices
    #[arg(long)]
    pub device_list: bool,

    /// Play through a specific audio output device
    #[arg(long)]
    pub output_device: Option<String>,

    /// Pick the audio output device from an interactive list
    #[arg(long, conflicts_with = "output_device")]
    pub choose_device: bool,

    /// WAV file used for the first beat of each measure
    #[arg(long, value_name = "PATH")]
    pub accent_sample: Option<PathBuf>,

    /// WAV file used for the remaining beats
    #[arg(long, value_name = "PATH")]
    pub regular_sample: Option<PathBuf>,

    /// Playback gain applied to both cues
    #[arg(long)]
    pub volume: Option<f32>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn validate_device(device_name: &str, devices: &[String]) -> Result<(), String> {
    if !devices.iter().any(|d| d.contains(device_name)) {
        let mut error_msg = format!(
            "Error: Device '{}' not found in available devices:\n",
            device_name
        );
        for device in devices {
            error_msg.push_str(&format!("  - {}\n", device));
        }
        return Err(error_msg);
    }
    Ok(())
}
