// Host-side tests for the chapter entrance state machine. Timers are the
// caller's job, so phases advance by calling the scheduled transitions
// directly.

#![allow(dead_code)]
mod chapter {
    include!("../src/core/chapter.rs");
}

use chapter::*;

#[test]
fn full_cycle_runs_intro_dock_reveal() {
    let mut m = ChapterMachine::new();
    assert_eq!(m.phase(), ChapterPhase::Idle);

    let schedule = m.begin(0.5).expect("cycle should start");
    assert_eq!(m.phase(), ChapterPhase::Intro);
    assert_eq!(schedule.dock_at_ms, 1100);
    assert_eq!(schedule.reveal_at_ms, 1800);
    assert!(!m.docked());

    m.dock();
    assert_eq!(m.phase(), ChapterPhase::Dock);
    assert!(m.docked());
    assert!(!m.revealed());

    m.reveal();
    assert_eq!(m.phase(), ChapterPhase::Reveal);
    assert!(m.docked());
    assert!(m.revealed());
}

#[test]
fn below_threshold_does_not_start() {
    let mut m = ChapterMachine::new();
    assert!(m.begin(0.39).is_none());
    assert_eq!(m.phase(), ChapterPhase::Idle);
    assert!(m.begin(CHAPTER_START_THRESHOLD).is_some());
}

#[test]
fn retrigger_mid_sequence_is_ignored() {
    let mut m = ChapterMachine::new();
    m.begin(1.0);
    m.dock();
    assert!(m.begin(1.0).is_none());
    assert_eq!(m.phase(), ChapterPhase::Dock);
}

#[test]
fn reveal_cannot_skip_dock() {
    let mut m = ChapterMachine::new();
    m.begin(1.0);
    m.reveal();
    assert_eq!(m.phase(), ChapterPhase::Intro);
}

#[test]
fn exit_cancels_from_any_phase_and_rearms() {
    for transitions in 0..3_usize {
        let mut m = ChapterMachine::new();
        m.begin(1.0);
        if transitions >= 1 {
            m.dock();
        }
        if transitions >= 2 {
            m.reveal();
        }
        assert!(m.reset_on_exit());
        assert_eq!(m.phase(), ChapterPhase::Idle);
        // A fresh cycle can start after the cancel
        assert!(m.begin(1.0).is_some());
    }
}

#[test]
fn exit_while_idle_reports_nothing_to_cancel() {
    let mut m = ChapterMachine::new();
    assert!(!m.reset_on_exit());
}

#[test]
fn reduced_motion_pins_the_revealed_state() {
    let mut m = ChapterMachine::new();
    m.skip_to_reveal();
    assert!(m.docked());
    assert!(m.revealed());

    // Leaving the viewport must not unwind a pinned reveal
    assert!(!m.reset_on_exit());
    assert_eq!(m.phase(), ChapterPhase::Reveal);
    // And no new cycle can restart the animation
    assert!(m.begin(1.0).is_none());
}

#[test]
fn schedule_matches_phase_delays() {
    assert_eq!(DOCK_AT_MS, CHAPTER_INTRO_MS + CHAPTER_HOLD_MS);
    assert_eq!(REVEAL_AT_MS, DOCK_AT_MS + CHAPTER_DOCK_MS);
}
