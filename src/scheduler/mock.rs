use crate::scheduler::{Scheduler, Timer};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a [`ManualScheduler`] has been asked to do.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScheduleLog {
    /// `(generation, interval)` of every arm request, in order.
    pub armed: Vec<(u64, Duration)>,
    pub cancelled: Vec<u64>,
    pub live: usize,
    pub max_live: usize,
}

/// Scheduler that never fires on its own; tests deliver ticks by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    log: Arc<Mutex<ScheduleLog>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> ScheduleLog {
        self.log.lock().unwrap().clone()
    }

    /// Generation of the most recently armed timer.
    pub fn last_generation(&self) -> Option<u64> {
        self.log.lock().unwrap().armed.last().map(|(gen, _)| *gen)
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn arm(&self, interval: Duration, generation: u64) -> ManualTimer {
        let mut log = self.log.lock().unwrap();
        log.armed.push((generation, interval));
        log.live += 1;
        log.max_live = log.max_live.max(log.live);
        ManualTimer {
            generation,
            log: Arc::clone(&self.log),
        }
    }
}

#[derive(Debug)]
pub struct ManualTimer {
    generation: u64,
    log: Arc<Mutex<ScheduleLog>>,
}

impl Timer for ManualTimer {
    fn cancel(self) {
        let mut log = self.log.lock().unwrap();
        log.live -= 1;
        log.cancelled.push(self.generation);
    }
}
