//! Repeating beat timers
//!
//! A [`Scheduler`] arms timers that deliver [`EngineMessage::Tick`] at a fixed
//! interval. Every tick carries the generation it was armed with so the event
//! loop can drop ticks that were already queued when their timer was cancelled.

pub mod mock;

use crate::event_loop::EngineMessage;
use crossbeam::channel::{self, select, Sender};
use log::{debug, trace, warn};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to an armed timer. Cancelling is synchronous: once `cancel`
/// returns, the timer produces no further ticks.
pub trait Timer {
    fn cancel(self);
}

pub trait Scheduler {
    type Timer: Timer;

    fn arm(&self, interval: Duration, generation: u64) -> Self::Timer;
}

/// Runs each timer on its own thread and posts ticks into the engine channel.
pub struct ThreadScheduler {
    tick_tx: Sender<EngineMessage>,
}

impl ThreadScheduler {
    pub fn new(tick_tx: Sender<EngineMessage>) -> Self {
        ThreadScheduler { tick_tx }
    }
}

impl Scheduler for ThreadScheduler {
    type Timer = ThreadTimer;

    fn arm(&self, interval: Duration, generation: u64) -> ThreadTimer {
        debug!(
            "Arming timer generation {} every {} µs",
            generation,
            interval.as_micros()
        );
        let (cancel_tx, cancel_rx) = channel::bounded::<()>(0);
        let tick_tx = self.tick_tx.clone();

        let handle = thread::spawn(move || {
            let ticker = channel::tick(interval);
            loop {
                select! {
                    recv(cancel_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        trace!("Timer generation {} fired", generation);
                        if tick_tx.send(EngineMessage::Tick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
            trace!("Timer generation {} exited", generation);
        });

        ThreadTimer {
            generation,
            cancel_tx,
            handle,
        }
    }
}

pub struct ThreadTimer {
    generation: u64,
    cancel_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Timer for ThreadTimer {
    fn cancel(self) {
        // Dropping the sender disconnects the cancel channel and wakes the select.
        drop(self.cancel_tx);
        if self.handle.join().is_err() {
            warn!("Timer generation {} panicked", self.generation);
        }
        debug!("Cancelled timer generation {}", self.generation);
    }
}
