// ui.rs

use crate::config::BEATS_PER_MEASURE;
use crate::event_loop::SharedState;
use indicatif::ProgressDrawTarget;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

const REFRESH_INTERVAL: Duration = Duration::from_millis(25);

pub fn create_beat_progress(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new(u64::from(BEATS_PER_MEASURE)));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:40.cyan}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("⣀⣤⣦⣶⣷⣿ "),
    );
    pb.set_prefix("Beat");
    pb
}

pub fn create_transport_spinner(multi_progress: &MultiProgress) -> ProgressBar {
    let pb = multi_progress.add(ProgressBar::new_spinner());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix("Transport");
    pb
}

/// Progress-bar display for `--headless` runs.
pub struct HeadlessUi {
    shared_state: SharedState,

    #[allow(dead_code)]
    multi_progress: MultiProgress,
    beat_pb: ProgressBar,
    transport_pb: ProgressBar,
}

impl HeadlessUi {
    pub fn new(shared_state: SharedState) -> Self {
        Self::with_draw_target(shared_state, ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(shared_state: SharedState, target: ProgressDrawTarget) -> Self {
        let multi_progress = MultiProgress::with_draw_target(target);
        let beat_pb = create_beat_progress(&multi_progress);
        let transport_pb = create_transport_spinner(&multi_progress);

        HeadlessUi {
            shared_state,
            multi_progress,
            beat_pb,
            transport_pb,
        }
    }

    /// Redraws from the shared snapshot and reports whether the metronome is playing.
    pub fn refresh(&self) -> bool {
        let snapshot = match self.shared_state.lock() {
            Ok(state) => state.clone(),
            Err(_) => return false,
        };

        // Beats are shown 1-based; nothing is lit before the first click.
        self.beat_pb
            .set_position(snapshot.last_beat.map_or(0, |beat| u64::from(beat) + 1));
        self.transport_pb.set_message(format!(
            "{}, Clicks: {}, Transport: {}",
            snapshot.tempo,
            snapshot.clicks,
            if snapshot.playing { "Playing" } else { "Stopped" }
        ));
        self.transport_pb.tick();
        snapshot.playing
    }

    /// Redraws until playback has started and then stopped again.
    pub fn run(&self) {
        let mut seen_playing = false;
        loop {
            let playing = self.refresh();
            if playing {
                seen_playing = true;
            } else if seen_playing {
                break;
            }
            thread::sleep(REFRESH_INTERVAL);
        }
        self.transport_pb.finish_with_message("Stopped");
    }
}
