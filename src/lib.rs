pub mod audio;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod logging;
pub mod metronome;
pub mod scheduler;
pub mod state;
pub mod tui;
pub mod ui;

pub use cli::Args;
pub use config::Settings;
pub use event_loop::{create_shared_state, EngineMessage, EventLoop, SharedState, Snapshot};
pub use metronome::Metronome;
pub use scheduler::{Scheduler, ThreadScheduler};
pub use state::{Cue, Tempo};
