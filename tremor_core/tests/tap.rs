use std::time::Duration;

use rstest::rstest;
use tremor_core::{RapidTapTest, TapCfg, TapRhythmAnalyzer, TestPhase, Transition};
use tremor_traits::clock::test_clock::TestClock;

fn analyzer(taps_at: &[u64]) -> TapRhythmAnalyzer {
    let mut a = TapRhythmAnalyzer::new(TapCfg::default());
    for &t in taps_at {
        a.record(t);
    }
    a
}

fn evenly(count: u64, gap: u64) -> Vec<u64> {
    (0..count).map(|i| i * gap).collect()
}

#[test]
fn slow_steady_taps_over_full_run() {
    let clock = TestClock::new();
    let mut t = RapidTapTest::new(TapCfg::default(), clock.clone()).unwrap();
    assert_eq!(t.start(), Transition::Started);
    for i in 0..10 {
        if i > 0 {
            clock.advance_ms(1500);
        }
        assert!(t.tap().is_some());
    }
    for _ in 0..15 {
        t.tick();
    }
    assert_eq!(t.phase(), TestPhase::Done);
    let m = t.metrics().expect("frozen metrics");
    assert_eq!(m.taps, 10);
    assert_eq!(m.taps_per_second, 0.7);
    assert_eq!(m.mean_gap_ms, Some(1500.0));
    assert_eq!(m.rhythm_score, Some(0));
}

#[test]
fn two_taps_have_no_rhythm_score() {
    let a = analyzer(&[0, 500]);
    assert_eq!(a.rhythm_score(), None);
    assert_eq!(a.mean_gap_ms(), Some(500.0));
}

#[test]
fn five_taps_have_no_fatigue_index() {
    let a = analyzer(&evenly(5, 500));
    assert!(a.rhythm_score().is_some());
    assert_eq!(a.fatigue_index_percent(), None);
}

fn from_gaps(gaps: &[u64]) -> TapRhythmAnalyzer {
    let mut at = 0;
    let mut taps = vec![at];
    for g in gaps {
        at += g;
        taps.push(at);
    }
    analyzer(&taps)
}

// Six taps give five gaps; both windows share the gap into tap 4.
#[rstest]
#[case(&[400, 500, 600, 700, 800], 40)]
#[case(&[600, 500, 400, 300, 200], -40)]
#[case(&[500, 500, 500, 500, 500], 0)]
#[case(&[300, 300, 900, 300, 300], 0)]
fn six_taps_share_the_middle_gap(#[case] gaps: &[u64], #[case] expected: i64) {
    let a = from_gaps(gaps);
    assert_eq!(a.len(), 6);
    assert_eq!(a.fatigue_index_percent(), Some(expected));
}

#[test]
fn slowing_down_is_positive_fatigue() {
    // leading gaps 400, trailing gaps 600
    let a = analyzer(&[0, 400, 800, 1200, 1800, 2400, 3000]);
    assert_eq!(a.fatigue_index_percent(), Some(50));
}

#[rstest]
#[case(500, 100)]
#[case(550, 95)]
#[case(450, 95)]
#[case(505, 100)] // 99.5 rounds half up
#[case(1500, 0)]
fn rhythm_score_by_mean_gap(#[case] gap: u64, #[case] expected: i64) {
    let a = analyzer(&evenly(4, gap));
    assert_eq!(a.rhythm_score(), Some(expected));
}

#[test]
fn rhythm_never_exceeds_100() {
    for gap in [480u64, 495, 500, 505, 520] {
        let a = analyzer(&evenly(6, gap));
        assert!(a.rhythm_score().unwrap() <= 100);
    }
}

#[test]
fn taps_outside_running_are_ignored() {
    let clock = TestClock::new();
    let cfg = TapCfg {
        duration_s: 2,
        ..TapCfg::default()
    };
    let mut t = RapidTapTest::new(cfg, clock).unwrap();
    assert!(t.tap().is_none());
    t.start();
    assert!(t.tap_at(10).is_some());
    t.tick();
    t.tick();
    assert_eq!(t.phase(), TestPhase::Done);
    assert!(t.tap_at(2500).is_none());
    assert_eq!(t.taps(), 1);
    assert_eq!(t.metrics().unwrap().taps, 1);
}

#[test]
fn metrics_stay_frozen_and_reset_clears_everything() {
    let cfg = TapCfg {
        duration_s: 1,
        ..TapCfg::default()
    };
    let mut t = RapidTapTest::new(cfg, TestClock::new()).unwrap();
    t.start();
    t.tap_at(0);
    t.tap_at(500);
    t.tap_at(1000);
    assert_eq!(t.tick(), Transition::Completed);
    let frozen = *t.metrics().unwrap();
    assert_eq!(frozen.taps_per_second, 3.0);
    assert_eq!(t.tick(), Transition::Ignored);
    assert_eq!(t.metrics(), Some(&frozen));

    assert_eq!(t.reset(), Transition::Reset);
    assert_eq!(t.taps(), 0);
    assert!(t.metrics().is_none());
    assert!(t.gap_series().is_empty());
    assert_eq!(t.elapsed(), 0);
}

#[test]
fn tap_timestamps_are_relative_to_start() {
    let clock = TestClock::new();
    let mut t = RapidTapTest::new(TapCfg::default(), clock.clone()).unwrap();
    clock.advance(Duration::from_secs(30));
    t.start();
    clock.advance_ms(250);
    let ev = t.tap().unwrap();
    assert_eq!(ev.at_ms, 250);
    assert_eq!(ev.inter_arrival_ms, 0.0);
}
