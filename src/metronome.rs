use crate::audio::ClickSink;
use crate::scheduler::{Scheduler, Timer};
use crate::state::{Command, Cue, Effect, MetronomeState, Tempo};
use log::{debug, info, warn};

/// Owns the metronome state, its single beat timer and the click sink.
///
/// Each command runs through [`MetronomeState::step`]; the resulting effects
/// are applied in order. Arming always disarms first, so at most one timer is
/// live. Dropping the metronome cancels its timer.
pub struct Metronome<S: Scheduler, K: ClickSink> {
    state: MetronomeState,
    scheduler: S,
    sink: K,
    timer: Option<S::Timer>,
    generation: u64,
    clicks: u64,
    last_cue: Option<Cue>,
}

impl<S: Scheduler, K: ClickSink> Metronome<S, K> {
    pub fn new(tempo: Tempo, scheduler: S, sink: K) -> Self {
        info!("Metronome created at {}", tempo);
        Metronome {
            state: MetronomeState::new(tempo),
            scheduler,
            sink,
            timer: None,
            generation: 0,
            clicks: 0,
            last_cue: None,
        }
    }

    pub fn state(&self) -> &MetronomeState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn tempo(&self) -> Tempo {
        self.state.tempo()
    }

    /// Total clicks emitted since creation.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn last_cue(&self) -> Option<Cue> {
        self.last_cue
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start(&mut self) {
        self.handle(Command::Start);
    }

    pub fn stop(&mut self) {
        self.handle(Command::Stop);
    }

    pub fn toggle(&mut self) {
        self.handle(Command::Toggle);
    }

    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.handle(Command::SetTempo(tempo));
    }

    /// Delivers a tick from the timer armed as `generation`. Ticks from any
    /// other timer were queued before it was cancelled and are dropped.
    pub fn on_tick(&mut self, generation: u64) {
        if self.timer.is_none() || generation != self.generation {
            debug!(
                "Dropping stale tick from generation {} (current {})",
                generation, self.generation
            );
            return;
        }
        self.handle(Command::Tick);
    }

    pub fn handle(&mut self, command: Command) {
        let was_playing = self.state.is_playing();
        for effect in self.state.step(command) {
            self.apply(effect);
        }
        if was_playing != self.state.is_playing() {
            info!(
                "Transport {} at {}",
                if self.state.is_playing() { "started" } else { "stopped" },
                self.state.tempo()
            );
        } else if let Command::SetTempo(tempo) = command {
            info!("Tempo set to {}", tempo);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Disarm => self.disarm(),
            Effect::Arm(interval) => {
                self.disarm();
                self.generation += 1;
                self.timer = Some(self.scheduler.arm(interval, self.generation));
            }
            Effect::Click(cue) => {
                self.clicks += 1;
                self.last_cue = Some(cue);
                if let Err(e) = self.sink.play(cue) {
                    warn!("Click not played: {}", e);
                }
            }
        }
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<S: Scheduler, K: ClickSink> Drop for Metronome<S, K> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::scheduler::mock::ManualScheduler;

    #[test]
    fn test_drop_cancels_timer() {
        let scheduler = ManualScheduler::new();
        let mut metronome = Metronome::new(Tempo::default(), scheduler.clone(), RecordingSink::new());
        metronome.start();
        assert_eq!(scheduler.log().live, 1);

        drop(metronome);
        assert_eq!(scheduler.log().live, 0);
    }

    #[test]
    fn test_sink_failure_does_not_stop_transport() {
        let sink = RecordingSink::failing();
        let scheduler = ManualScheduler::new();
        let mut metronome = Metronome::new(Tempo::default(), scheduler.clone(), sink.clone());

        metronome.start();
        metronome.on_tick(scheduler.last_generation().unwrap());

        assert!(metronome.is_playing());
        assert_eq!(sink.played(), vec![Cue::Accent, Cue::Regular]);
        assert_eq!(metronome.clicks(), 2);
    }
}
