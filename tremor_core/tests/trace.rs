use rstest::rstest;
use tremor_core::trace::{direction_changes, score_path};
use tremor_core::{
    FixedSurface, PointerEvent, Rating, TraceCfg, TracePoint, TraceScorer, TraceState,
};

fn path(ys: &[f64]) -> Vec<TracePoint> {
    ys.iter()
        .enumerate()
        .map(|(i, y)| TracePoint::new(20.0 + i as f64 * 20.0, *y))
        .collect()
}

fn draw(scorer: &mut TraceScorer, pts: &[TracePoint]) {
    let (first, rest) = pts.split_first().expect("non-empty path");
    assert!(scorer.pointer_down(*first));
    for p in rest {
        assert!(scorer.pointer_move(*p));
    }
    scorer.pointer_up();
}

#[test]
fn horizontal_path_on_target_is_perfect() {
    let mut s = TraceScorer::default();
    draw(&mut s, &path(&[90.0; 20]));
    let m = s.metrics().expect("scored");
    assert_eq!(m.average_deviation, 0);
    assert_eq!(m.smoothness, 100);
    assert_eq!(m.rating, Rating::Good);
    assert_eq!(m.points, 20);
}

#[test]
fn too_few_points_leaves_metrics_empty() {
    let mut s = TraceScorer::default();
    draw(&mut s, &path(&[90.0, 91.0, 92.0]));
    assert_eq!(s.state(), TraceState::Done);
    assert!(s.metrics().is_none());
}

#[rstest]
#[case(4, false)]
#[case(5, true)]
#[case(6, true)]
fn scoring_starts_at_five_points(#[case] n: usize, #[case] scored: bool) {
    let mut s = TraceScorer::default();
    draw(&mut s, &path(&vec![92.0; n]));
    assert_eq!(s.state(), TraceState::Done);
    assert_eq!(s.metrics().is_some(), scored);
    if let Some(m) = s.metrics() {
        assert_eq!(m.points, n);
        assert_eq!(m.average_deviation, 2);
        assert_eq!(m.smoothness, 100);
    }
}

#[test]
fn zigzag_is_less_smooth_than_a_single_turn() {
    let zigzag = path(&[0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0]);
    let one_turn = path(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    assert_eq!(direction_changes(&one_turn), 1);
    let z = score_path(&zigzag, 0.0).unwrap();
    let o = score_path(&one_turn, 0.0).unwrap();
    assert!(z.smoothness < o.smoothness, "{} !< {}", z.smoothness, o.smoothness);
}

#[rstest]
#[case(90.0 + 7.0, Rating::Good)]
#[case(90.0 + 8.0, Rating::Moderate)]
#[case(90.0 - 17.0, Rating::Moderate)]
#[case(90.0 + 18.0, Rating::NeedsAttention)]
fn rating_follows_deviation(#[case] y: f64, #[case] expected: Rating) {
    let mut s = TraceScorer::default();
    draw(&mut s, &path(&[y; 6]));
    assert_eq!(s.metrics().map(|m| m.rating), Some(expected));
}

#[test]
fn moves_are_ignored_before_down_and_after_up() {
    let mut s = TraceScorer::default();
    assert!(!s.pointer_move(TracePoint::new(1.0, 1.0)));
    draw(&mut s, &path(&[90.0; 6]));
    assert!(!s.pointer_move(TracePoint::new(1.0, 1.0)));
    assert!(!s.pointer_down(TracePoint::new(1.0, 1.0)));
    assert_eq!(s.points().len(), 6);
    assert!(s.pointer_up().is_none());
}

#[test]
fn down_clears_the_previous_stroke_while_drawing() {
    let mut s = TraceScorer::default();
    s.pointer_down(TracePoint::new(0.0, 50.0));
    s.pointer_move(TracePoint::new(5.0, 50.0));
    s.pointer_down(TracePoint::new(10.0, 90.0));
    assert_eq!(s.points(), &[TracePoint::new(10.0, 90.0)]);
    assert_eq!(s.cursor(), Some(TracePoint::new(10.0, 90.0)));
}

#[test]
fn reset_allows_a_retrace() {
    let mut s = TraceScorer::new(TraceCfg {
        target_y: 40.0,
        ..TraceCfg::default()
    });
    draw(&mut s, &path(&[50.0; 8]));
    assert_eq!(s.metrics().unwrap().average_deviation, 10);
    s.reset();
    assert_eq!(s.state(), TraceState::Ready);
    assert!(s.points().is_empty());
    assert!(s.metrics().is_none());
    assert_eq!(s.target_y(), 40.0);
    draw(&mut s, &path(&[40.0; 8]));
    assert_eq!(s.metrics().unwrap().average_deviation, 0);
}

#[test]
fn events_are_scaled_through_the_surface() {
    // 460x180 store displayed at 230x90: every client pixel is two surface pixels.
    let surface = FixedSurface::unscaled(460.0, 180.0).displayed_at(230.0, 90.0);
    let mut s = TraceScorer::default();
    assert!(s.handle(&surface, PointerEvent::Down { x: 10.0, y: 45.0 }));
    for i in 1..10 {
        s.handle(
            &surface,
            PointerEvent::Move {
                x: 10.0 + f64::from(i) * 20.0,
                y: 45.0,
            },
        );
    }
    assert!(s.handle(&surface, PointerEvent::Up));
    assert_eq!(s.points()[1], TracePoint::new(60.0, 90.0));
    let m = s.metrics().unwrap();
    assert_eq!(m.average_deviation, 0);
    assert_eq!(m.points, 10);
    assert!(!s.handle(&surface, PointerEvent::Up));
}
