//! Integration tests for the focus/break cycle.
//!
//! Drives the engine through full sessions against a temporary store and a
//! manual clock, then checks the persisted document.

use std::sync::Arc;

use chrono::NaiveDate;
use pomodoro_core::{
    CompletionEvent, Event, ManualClock, SessionEngine, SessionMode, Settings, Store,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    _dir: TempDir,
    store: Arc<Store>,
    clock: ManualClock,
    engine: SessionEngine,
}

fn fixture(settings: Settings, today: NaiveDate) -> Fixture {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(Store::in_dir(dir.path()));
    store.save_settings(settings).unwrap();
    let clock = ManualClock::new(today);
    let engine = SessionEngine::with_clock(store.clone(), clock.clone()).unwrap();
    Fixture {
        _dir: dir,
        store,
        clock,
        engine,
    }
}

fn classic() -> Settings {
    Settings {
        focus_minutes: 25,
        short_break_minutes: 5,
        long_break_minutes: 15,
        sessions_until_long: 4,
        ..Settings::default()
    }
}

/// Start the current session and tick until it completes.
fn run_session(engine: &mut SessionEngine) -> CompletionEvent {
    engine.start().unwrap();
    loop {
        match engine.tick().unwrap() {
            Some(Event::SessionCompleted(done)) => return done,
            Some(Event::Progress { .. }) => {}
            other => panic!("unexpected tick result: {other:?}"),
        }
    }
}

#[test]
fn classic_cycle_ends_with_long_break() {
    let mut f = fixture(classic(), date(2026, 9, 15));

    let mut modes = Vec::new();
    let mut cycle_after_long = None;
    for _ in 0..8 {
        let done = run_session(&mut f.engine);
        modes.push(done.completed_mode);
        if done.completed_mode == SessionMode::LongBreak {
            cycle_after_long = Some(f.store.load().unwrap().current_cycle);
        }
    }

    use SessionMode::*;
    assert_eq!(
        modes,
        vec![Focus, ShortBreak, Focus, ShortBreak, Focus, ShortBreak, Focus, LongBreak]
    );
    let doc = f.store.load().unwrap();
    assert_eq!(doc.stats.total_pomodoros, 4);
    assert_eq!(doc.stats.total_focus_secs, 4 * 25 * 60);
    assert_eq!(cycle_after_long, Some(0));
    assert_eq!(f.engine.mode(), Focus);
    assert_eq!(f.engine.remaining_secs(), 25 * 60);
}

#[test]
fn break_durations_follow_settings() {
    let mut f = fixture(classic(), date(2026, 9, 15));

    let first = run_session(&mut f.engine);
    assert_eq!(first.next_mode, SessionMode::ShortBreak);
    assert_eq!(first.next_duration_secs, 5 * 60);

    let back = run_session(&mut f.engine);
    assert_eq!(back.completed_mode, SessionMode::ShortBreak);
    assert_eq!(back.next_mode, SessionMode::Focus);
    assert_eq!(back.next_duration_secs, 25 * 60);
    assert_ne!(first.reward_message, back.reward_message);
}

#[test]
fn third_stored_cycle_earns_long_break() {
    let f = fixture(classic(), date(2026, 9, 15));
    f.store.transact(|doc| doc.current_cycle = 3).unwrap();

    let mut engine = SessionEngine::with_clock(f.store.clone(), f.clock.clone()).unwrap();
    assert_eq!(engine.state().cycle_count, 3);
    let done = engine.complete_session().unwrap();
    assert_eq!(done.next_mode, SessionMode::LongBreak);
    assert_eq!(done.next_duration_secs, 15 * 60);
    assert_eq!(done.current_cycle, 4);
}

#[test]
fn first_stored_cycle_earns_short_break() {
    let f = fixture(classic(), date(2026, 9, 15));
    f.store.transact(|doc| doc.current_cycle = 1).unwrap();

    let mut engine = SessionEngine::with_clock(f.store.clone(), f.clock.clone()).unwrap();
    let done = engine.complete_session().unwrap();
    assert_eq!(done.next_mode, SessionMode::ShortBreak);
    assert_eq!(done.next_duration_secs, 5 * 60);
    assert_eq!(f.store.load().unwrap().current_cycle, 2);
}

#[test]
fn cycle_counter_survives_restart() {
    let mut f = fixture(classic(), date(2026, 9, 15));
    run_session(&mut f.engine);
    run_session(&mut f.engine);
    drop(f.engine);

    let engine = SessionEngine::with_clock(f.store.clone(), f.clock.clone()).unwrap();
    assert_eq!(engine.mode(), SessionMode::Focus);
    assert_eq!(engine.state().cycle_count, 1);
}

#[test]
fn n_focus_completions_count_n_pomodoros() {
    let settings = Settings {
        focus_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        sessions_until_long: 3,
        ..Settings::default()
    };
    let mut f = fixture(settings, date(2026, 9, 15));
    let mut focus_done = 0;
    while focus_done < 7 {
        if run_session(&mut f.engine).completed_mode == SessionMode::Focus {
            focus_done += 1;
        }
    }
    let doc = f.store.load().unwrap();
    assert_eq!(doc.stats.total_pomodoros, 7);
    assert_eq!(doc.stats.bucketed_pomodoros(), 7);
}

#[test]
fn same_day_completions_share_a_bucket() {
    let mut f = fixture(classic(), date(2026, 9, 15));
    run_session(&mut f.engine);
    run_session(&mut f.engine);
    run_session(&mut f.engine);

    let doc = f.store.load().unwrap();
    assert_eq!(doc.stats.daily_buckets.len(), 1);
    let bucket = doc.stats.bucket(date(2026, 9, 15));
    assert_eq!(bucket.pomodoros, 2);
    assert_eq!(bucket.focus_secs, 2 * 25 * 60);
}

#[test]
fn new_day_replaces_all_buckets() {
    let mut f = fixture(classic(), date(2026, 9, 15));
    run_session(&mut f.engine);
    run_session(&mut f.engine);

    f.clock.advance_days(1);
    run_session(&mut f.engine);

    let doc = f.store.load().unwrap();
    let keys: Vec<_> = doc.stats.daily_buckets.keys().copied().collect();
    assert_eq!(keys, vec![date(2026, 9, 16)]);
    assert_eq!(doc.stats.bucket(date(2026, 9, 16)).pomodoros, 1);
    assert_eq!(doc.last_active_date, Some(date(2026, 9, 16)));
    // Earlier day's pomodoro is gone from the buckets but kept in the total.
    assert_eq!(doc.stats.total_pomodoros, 2);
    assert_eq!(doc.stats.weekly_pomodoros, 0);
}

#[test]
fn reset_never_touches_statistics() {
    let mut f = fixture(classic(), date(2026, 9, 15));
    run_session(&mut f.engine);
    let before = f.store.load().unwrap();

    f.engine.start().unwrap();
    for _ in 0..120 {
        f.engine.tick().unwrap();
    }
    f.engine.reset();
    f.engine.reset();

    assert_eq!(f.store.load().unwrap(), before);
    assert_eq!(f.engine.mode(), SessionMode::ShortBreak);
    assert_eq!(f.engine.remaining_secs(), 5 * 60);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn cycle_returns_to_zero_only_after_long_break(sessions in 1u32..=10, rounds in 1usize..=3) {
        let settings = Settings {
            focus_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 1,
            sessions_until_long: sessions,
            ..Settings::default()
        };
        let mut f = fixture(settings, date(2026, 9, 15));

        for _ in 0..rounds {
            for n in 1..=sessions {
                let focus = f.engine.complete_session().unwrap();
                prop_assert_eq!(focus.completed_mode, SessionMode::Focus);
                prop_assert_eq!(focus.current_cycle, n);

                let brk = f.engine.complete_session().unwrap();
                if n < sessions {
                    prop_assert_eq!(brk.completed_mode, SessionMode::ShortBreak);
                    prop_assert_eq!(brk.current_cycle, n);
                } else {
                    prop_assert_eq!(brk.completed_mode, SessionMode::LongBreak);
                    prop_assert_eq!(brk.current_cycle, 0);
                }
            }
        }

        let doc = f.store.load().unwrap();
        prop_assert_eq!(doc.current_cycle, 0);
        prop_assert_eq!(doc.stats.total_pomodoros, u64::from(sessions) * rounds as u64);
    }
}
