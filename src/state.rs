use crate::config::{BEATS_PER_MEASURE, DEFAULT_BPM, MAX_BPM, MIN_BPM};
use std::fmt;
use std::time::Duration;

/// Beats per minute, always within `MIN_BPM..=MAX_BPM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tempo(u32);

impl Tempo {
    /// Builds a tempo, returning `None` outside the supported range.
    pub fn new(bpm: u32) -> Option<Self> {
        (MIN_BPM..=MAX_BPM).contains(&bpm).then_some(Tempo(bpm))
    }

    /// Builds a tempo, pinning out-of-range values to the nearest bound.
    pub fn clamped(bpm: i64) -> Self {
        Tempo(bpm.clamp(i64::from(MIN_BPM), i64::from(MAX_BPM)) as u32)
    }

    pub fn bpm(self) -> u32 {
        self.0
    }

    /// Time between two clicks.
    pub fn interval(self) -> Duration {
        Duration::from_micros(60_000_000 / u64::from(self.0))
    }

    /// Moves the tempo by `delta` BPM, saturating at the range bounds.
    pub fn nudge(self, delta: i32) -> Self {
        Self::clamped(i64::from(self.0) + i64::from(delta))
    }

    /// Position inside the range as a ratio in `[0, 1]`, for slider rendering.
    pub fn ratio(self) -> f64 {
        f64::from(self.0 - MIN_BPM) / f64::from(MAX_BPM - MIN_BPM)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo(DEFAULT_BPM)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

/// Position of the next click inside the measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeatIndex(u32);

impl BeatIndex {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_downbeat(self) -> bool {
        self.0 % BEATS_PER_MEASURE == 0
    }

    pub fn advance(self) -> Self {
        BeatIndex((self.0 + 1) % BEATS_PER_MEASURE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Stopped,
    Playing,
}

/// Which of the two pre-loaded sounds a click uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Accent,
    Regular,
}

/// Inputs to the transport state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Toggle,
    SetTempo(Tempo),
    Tick,
}

/// Side effects requested by a state transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Disarm,
    Arm(Duration),
    Click(Cue),
}

/// Pure metronome state. All scheduling and sound decisions come out of
/// [`MetronomeState::step`] as [`Effect`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetronomeState {
    tempo: Tempo,
    play_state: PlayState,
    beat: BeatIndex,
}

impl MetronomeState {
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            ..Self::default()
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn beat(&self) -> BeatIndex {
        self.beat
    }

    pub fn step(&mut self, command: Command) -> Vec<Effect> {
        match (command, self.play_state) {
            (Command::Toggle, PlayState::Stopped) | (Command::Start, PlayState::Stopped) => {
                self.play_state = PlayState::Playing;
                self.beat = BeatIndex::default();
                let cue = self.emit();
                vec![
                    Effect::Disarm,
                    Effect::Click(cue),
                    Effect::Arm(self.tempo.interval()),
                ]
            }
            (Command::Toggle, PlayState::Playing) | (Command::Stop, PlayState::Playing) => {
                self.play_state = PlayState::Stopped;
                vec![Effect::Disarm]
            }
            (Command::Start, PlayState::Playing) | (Command::Stop, PlayState::Stopped) => {
                Vec::new()
            }
            (Command::SetTempo(tempo), _) if tempo == self.tempo => Vec::new(),
            (Command::SetTempo(tempo), PlayState::Stopped) => {
                self.tempo = tempo;
                Vec::new()
            }
            (Command::SetTempo(tempo), PlayState::Playing) => {
                self.tempo = tempo;
                self.beat = BeatIndex::default();
                vec![Effect::Disarm, Effect::Arm(tempo.interval())]
            }
            (Command::Tick, PlayState::Playing) => vec![Effect::Click(self.emit())],
            (Command::Tick, PlayState::Stopped) => Vec::new(),
        }
    }

    fn emit(&mut self) -> Cue {
        let cue = if self.beat.is_downbeat() {
            Cue::Accent
        } else {
            Cue::Regular
        };
        self.beat = self.beat.advance();
        cue
    }
}
