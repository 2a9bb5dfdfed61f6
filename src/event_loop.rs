// event_loop.rs

use crate::audio::ClickSink;
use crate::config::BEATS_PER_MEASURE;
use crate::metronome::Metronome;
use crate::scheduler::Scheduler;
use crate::state::{Cue, Tempo};
use chrono::{DateTime, Local};
use crossbeam::channel::Receiver;
use log::{debug, error, info};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Start,
    Stop,
    Toggle,
}

/// Everything the metronome thread reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    Tick { generation: u64 },
    TransportCommand(TransportAction),
    SetTempo(Tempo),
    NudgeTempo(i32),
    Quit,
}

/// Read-only view of the metronome for displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub tempo: Tempo,
    pub playing: bool,
    /// Index of the next beat to click, `0..BEATS_PER_MEASURE`.
    pub beat: u32,
    pub last_cue: Option<Cue>,
    /// Index of the beat that clicked most recently while playing.
    pub last_beat: Option<u32>,
    pub clicks: u64,
    pub started_at: Option<DateTime<Local>>,
}

pub type SharedState = Arc<Mutex<Snapshot>>;

pub fn create_shared_state(tempo: Tempo) -> SharedState {
    Arc::new(Mutex::new(Snapshot {
        tempo,
        ..Snapshot::default()
    }))
}

/// Sole owner of the [`Metronome`]. UI commands and timer ticks arrive on
/// one channel and are handled strictly in order on this thread.
pub struct EventLoop<S: Scheduler, K: ClickSink> {
    metronome: Metronome<S, K>,
    message_rx: Receiver<EngineMessage>,
    shared_state: SharedState,
}

impl<S: Scheduler, K: ClickSink> EventLoop<S, K> {
    pub fn new(
        metronome: Metronome<S, K>,
        message_rx: Receiver<EngineMessage>,
        shared_state: SharedState,
    ) -> Self {
        let event_loop = EventLoop {
            metronome,
            message_rx,
            shared_state,
        };
        event_loop.publish();
        event_loop
    }

    /// Processes messages until `Quit` arrives or every sender is gone.
    /// Returns the metronome, already stopped.
    pub fn run(mut self) -> Metronome<S, K> {
        info!("Event loop running");
        loop {
            match self.message_rx.recv() {
                Ok(EngineMessage::Quit) => {
                    info!("Quit received, leaving event loop");
                    break;
                }
                Ok(message) => self.handle_message(message),
                Err(e) => {
                    error!("Engine channel error: {}", e);
                    break;
                }
            }
        }
        self.metronome.stop();
        self.publish();
        self.metronome
    }

    pub fn handle_message(&mut self, message: EngineMessage) {
        match message {
            EngineMessage::Tick { generation } => self.metronome.on_tick(generation),
            EngineMessage::TransportCommand(TransportAction::Start) => self.metronome.start(),
            EngineMessage::TransportCommand(TransportAction::Stop) => self.metronome.stop(),
            EngineMessage::TransportCommand(TransportAction::Toggle) => self.metronome.toggle(),
            EngineMessage::SetTempo(tempo) => self.metronome.set_tempo(tempo),
            EngineMessage::NudgeTempo(delta) => {
                let tempo = self.metronome.tempo().nudge(delta);
                self.metronome.set_tempo(tempo);
            }
            EngineMessage::Quit => {}
        }
        self.publish();
    }

    fn publish(&self) {
        let Ok(mut snapshot) = self.shared_state.lock() else {
            error!("Shared state lock poisoned");
            return;
        };
        let playing = self.metronome.is_playing();
        if playing && !snapshot.playing {
            snapshot.started_at = Some(Local::now());
        }
        let beat = self.metronome.state().beat().value();
        if !playing {
            snapshot.last_beat = None;
        } else if self.metronome.clicks() != snapshot.clicks {
            snapshot.last_beat = Some((beat + BEATS_PER_MEASURE - 1) % BEATS_PER_MEASURE);
        }
        snapshot.tempo = self.metronome.tempo();
        snapshot.playing = playing;
        snapshot.beat = beat;
        snapshot.last_cue = self.metronome.last_cue();
        snapshot.clicks = self.metronome.clicks();
        debug!(
            "Snapshot: tempo={}, playing={}, beat={}, clicks={}",
            snapshot.tempo, snapshot.playing, snapshot.beat, snapshot.clicks
        );
    }
}
