use super::*;

const RANGE: DurationRange = DurationRange {
    min: 0.15,
    max: 0.35,
};

#[test]
fn duration_is_proportional_then_clamped() {
    assert_eq!(CorrectiveScroll::duration_for(0.0, 1000.0, RANGE), 0.15);
    assert_eq!(CorrectiveScroll::duration_for(10.0, 1000.0, RANGE), 0.15);
    let mid = CorrectiveScroll::duration_for(700.0, 1000.0, RANGE);
    assert!((mid - 0.245).abs() < 1e-12);
    assert_eq!(CorrectiveScroll::duration_for(5000.0, 1000.0, RANGE), 0.35);
    assert_eq!(CorrectiveScroll::duration_for(-5000.0, 1000.0, RANGE), 0.35);
    assert_eq!(CorrectiveScroll::duration_for(100.0, 0.0, RANGE), 0.35);
}

#[test]
fn sample_hits_endpoints_and_moves_monotonically() {
    let s = CorrectiveScroll::plan(1000.0, 1200.0, 1000.0, RANGE, Ease::OutCubic);
    assert_eq!(s.sample(0.0), 1000.0);
    assert_eq!(s.sample(s.duration_secs), 1200.0);
    assert_eq!(s.sample(10.0), 1200.0);

    let mut prev = s.sample(0.0);
    for i in 1..=20 {
        let v = s.sample(s.duration_secs * i as f64 / 20.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn executor_writes_until_finished() {
    let mut ex = SnapExecutor::new();
    let mut sink = RecordingSink::default();
    assert_eq!(ex.step(0.016, &mut sink), None);

    ex.start(CorrectiveScroll::plan(0.0, 100.0, 1000.0, RANGE, Ease::Linear));
    let mut steps = 0;
    while ex.is_active() {
        ex.step(0.05, &mut sink).unwrap();
        steps += 1;
        assert!(steps < 100);
    }
    assert_eq!(steps, 3);
    assert_eq!(sink.last(), Some(100.0));
    assert!(sink.offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn cancel_stops_writes() {
    let mut ex = SnapExecutor::new();
    let mut sink = RecordingSink::default();
    ex.start(CorrectiveScroll::plan(0.0, 500.0, 1000.0, RANGE, Ease::Linear));
    ex.step(0.05, &mut sink);
    assert!(ex.cancel());
    assert!(!ex.cancel());
    assert_eq!(ex.step(0.05, &mut sink), None);
    assert_eq!(sink.offsets.len(), 1);
}

#[test]
fn closures_are_sinks() {
    let mut seen = Vec::new();
    let mut ex = SnapExecutor::new();
    ex.start(CorrectiveScroll::plan(10.0, 10.0, 1000.0, RANGE, Ease::Linear));
    {
        let mut sink = |v: f64| seen.push(v);
        ex.step(0.0, &mut sink);
    }
    assert!(ex.is_active());
    assert_eq!(seen.first().copied(), Some(10.0));
}
