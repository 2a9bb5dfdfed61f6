use clicktrack::audio::RecordingSink;
use clicktrack::scheduler::mock::ManualScheduler;
use clicktrack::state::{Cue, Tempo};
use clicktrack::Metronome;
use std::time::Duration;

use Cue::{Accent as A, Regular as R};

fn setup(bpm: u32) -> (Metronome<ManualScheduler, RecordingSink>, ManualScheduler, RecordingSink) {
    let _ = env_logger::builder().is_test(true).try_init();
    let scheduler = ManualScheduler::new();
    let sink = RecordingSink::new();
    let metronome = Metronome::new(Tempo::new(bpm).unwrap(), scheduler.clone(), sink.clone());
    (metronome, scheduler, sink)
}

fn tick(metronome: &mut Metronome<ManualScheduler, RecordingSink>, scheduler: &ManualScheduler) {
    metronome.on_tick(scheduler.last_generation().unwrap());
}

#[test]
fn test_start_arms_at_tempo_interval() {
    for bpm in 60..=240 {
        let (mut metronome, scheduler, _sink) = setup(bpm);
        metronome.start();

        let log = scheduler.log();
        assert_eq!(log.armed.len(), 1);
        assert_eq!(
            log.armed[0].1,
            Duration::from_micros(60_000_000 / u64::from(bpm))
        );
    }
}

#[test]
fn test_start_clicks_accent_before_first_tick() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();

    assert_eq!(sink.played(), vec![A]);
    assert_eq!(metronome.state().beat().value(), 1);
    assert_eq!(scheduler.log().armed.len(), 1);
}

#[test]
fn test_ticks_cycle_through_measure() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();
    for _ in 0..11 {
        tick(&mut metronome, &scheduler);
    }

    assert_eq!(sink.played(), vec![A, R, R, R, A, R, R, R, A, R, R, R]);
    assert_eq!(metronome.clicks(), 12);
    assert_eq!(metronome.last_cue(), Some(R));
}

#[test]
fn test_stop_silences_in_flight_ticks() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();
    tick(&mut metronome, &scheduler);
    let in_flight = scheduler.last_generation().unwrap();

    metronome.stop();
    metronome.on_tick(in_flight);
    metronome.on_tick(in_flight);

    assert_eq!(sink.played(), vec![A, R]);
    assert!(!metronome.has_timer());
    assert_eq!(scheduler.log().live, 0);
}

#[test]
fn test_ticks_from_replaced_timer_are_dropped() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();
    let old_generation = scheduler.last_generation().unwrap();

    metronome.set_tempo(Tempo::new(150).unwrap());
    sink.clear();
    metronome.on_tick(old_generation);
    assert!(sink.played().is_empty());

    tick(&mut metronome, &scheduler);
    assert_eq!(sink.played(), vec![A]);
}

#[test]
fn test_restart_resets_beat_index() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();
    tick(&mut metronome, &scheduler);
    tick(&mut metronome, &scheduler);
    metronome.stop();
    sink.clear();

    metronome.start();
    tick(&mut metronome, &scheduler);
    assert_eq!(sink.played(), vec![A, R]);
}

#[test]
fn test_tempo_change_while_playing_rearms_and_resets() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.start();
    tick(&mut metronome, &scheduler);

    metronome.set_tempo(Tempo::new(120).unwrap());

    let log = scheduler.log();
    assert_eq!(log.armed.len(), 2);
    assert_eq!(log.armed[1].1, Duration::from_millis(500));
    assert_eq!(log.cancelled, vec![log.armed[0].0]);
    assert_eq!(log.live, 1);
    assert_eq!(metronome.state().beat().value(), 0);
    // No click of its own; the next tick opens a fresh measure.
    assert_eq!(sink.played(), vec![A, R]);
    tick(&mut metronome, &scheduler);
    assert_eq!(sink.played(), vec![A, R, A]);
}

#[test]
fn test_tempo_change_while_stopped_only_stores_value() {
    let (mut metronome, scheduler, sink) = setup(100);
    metronome.set_tempo(Tempo::new(200).unwrap());

    assert_eq!(metronome.tempo().bpm(), 200);
    assert!(scheduler.log().armed.is_empty());
    assert!(sink.played().is_empty());

    metronome.start();
    assert_eq!(scheduler.log().armed[0].1, Duration::from_millis(300));
}

#[test]
fn test_rapid_toggling_keeps_one_timer() {
    let (mut metronome, scheduler, _sink) = setup(100);
    for i in 0..100 {
        metronome.toggle();
        if i % 3 == 0 {
            metronome.set_tempo(Tempo::new(60 + i).unwrap());
        }
        let log = scheduler.log();
        assert!(log.live <= 1, "{} timers live after {} toggles", log.live, i + 1);
        assert_eq!(log.live == 1, metronome.is_playing());
    }
    assert_eq!(scheduler.log().max_live, 1);
}
