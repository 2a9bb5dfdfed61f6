extern crate clicktrack;

use clicktrack::audio::RecordingSink;
use clicktrack::event_loop::{create_shared_state, EngineMessage, EventLoop, TransportAction};
use clicktrack::scheduler::mock::ManualScheduler;
use clicktrack::state::{Cue, Tempo};
use clicktrack::{Metronome, ThreadScheduler};
use crossbeam::channel;
use std::thread;
use std::time::Duration;

#[test]
fn integration_test_threaded_clicks_stop_on_stop() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tempo = Tempo::new(240).unwrap();
    let shared_state = create_shared_state(tempo);
    let sink = RecordingSink::new();

    let (engine_tx, engine_rx) = channel::unbounded();
    let metronome = Metronome::new(tempo, ThreadScheduler::new(engine_tx.clone()), sink.clone());
    let event_loop = EventLoop::new(metronome, engine_rx, shared_state.clone());
    let handle = thread::spawn(move || event_loop.run());

    engine_tx
        .send(EngineMessage::TransportCommand(TransportAction::Start))
        .unwrap();
    // 240 BPM clicks every 250 ms: the immediate accent plus at least one tick.
    thread::sleep(Duration::from_millis(700));
    engine_tx
        .send(EngineMessage::TransportCommand(TransportAction::Stop))
        .unwrap();
    thread::sleep(Duration::from_millis(50));

    let after_stop = sink.played();
    assert!(after_stop.len() >= 2, "Only {} clicks played", after_stop.len());
    assert_eq!(after_stop[0], Cue::Accent);
    assert_eq!(after_stop[1], Cue::Regular);

    thread::sleep(Duration::from_millis(600));
    assert_eq!(sink.played(), after_stop, "Clicks continued after stop");

    engine_tx.send(EngineMessage::Quit).unwrap();
    let metronome = handle.join().expect("Event loop thread panicked");
    assert!(!metronome.is_playing());
    assert!(!metronome.has_timer());

    let state = shared_state.lock().unwrap();
    assert!(!state.playing);
    assert_eq!(state.clicks, after_stop.len() as u64);
}

#[test]
fn integration_test_event_loop_exits_when_senders_drop() {
    let shared_state = create_shared_state(Tempo::default());
    let (engine_tx, engine_rx) = channel::unbounded();
    let metronome = Metronome::new(Tempo::default(), ManualScheduler::new(), RecordingSink::new());
    let event_loop = EventLoop::new(metronome, engine_rx, shared_state);

    let handle = thread::spawn(move || event_loop.run());
    engine_tx.send(EngineMessage::NudgeTempo(5)).unwrap();
    drop(engine_tx);

    let metronome = handle.join().expect("Event loop thread panicked");
    assert_eq!(metronome.tempo().bpm(), 105);
}

#[test]
fn test_snapshot_follows_messages() {
    let shared_state = create_shared_state(Tempo::default());
    let scheduler = ManualScheduler::new();
    let (_engine_tx, engine_rx) = channel::unbounded();
    let metronome = Metronome::new(Tempo::default(), scheduler.clone(), RecordingSink::new());
    let mut event_loop = EventLoop::new(metronome, engine_rx, shared_state.clone());

    event_loop.handle_message(EngineMessage::TransportCommand(TransportAction::Toggle));
    {
        let state = shared_state.lock().unwrap();
        assert!(state.playing);
        assert!(state.started_at.is_some());
        assert_eq!(state.last_beat, Some(0));
        assert_eq!(state.last_cue, Some(Cue::Accent));
        assert_eq!(state.clicks, 1);
    }

    let generation = scheduler.last_generation().unwrap();
    event_loop.handle_message(EngineMessage::Tick { generation });
    event_loop.handle_message(EngineMessage::Tick { generation });
    assert_eq!(shared_state.lock().unwrap().last_beat, Some(2));

    // Saturates at the top of the range and re-arms once.
    event_loop.handle_message(EngineMessage::NudgeTempo(500));
    {
        let state = shared_state.lock().unwrap();
        assert_eq!(state.tempo.bpm(), 240);
        assert_eq!(state.beat, 0);
        assert_eq!(state.last_beat, Some(2));
    }
    assert_eq!(scheduler.log().armed.len(), 2);

    event_loop.handle_message(EngineMessage::NudgeTempo(10));
    assert_eq!(scheduler.log().armed.len(), 2);

    event_loop.handle_message(EngineMessage::TransportCommand(TransportAction::Stop));
    let state = shared_state.lock().unwrap();
    assert!(!state.playing);
    assert_eq!(state.last_beat, None);
    assert_eq!(scheduler.log().live, 0);
}
