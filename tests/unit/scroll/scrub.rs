use super::*;

#[test]
fn immediate_scrub_tracks_target() {
    let mut s = Scrub::immediate();
    s.set_target(0.4);
    assert_eq!(s.current(), 0.4);
    assert!(!s.is_animating());
    assert_eq!(s.advance(0.016), 0.4);
}

#[test]
fn lagged_scrub_approaches_and_settles_exactly() {
    let mut s = Scrub::new(0.6);
    s.set_target(1.0);
    let first = s.advance(1.0 / 60.0);
    assert!(first > 0.0 && first < 1.0);

    let mut prev = first;
    for _ in 0..600 {
        let v = s.advance(1.0 / 60.0);
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(s.current(), 1.0);
    assert!(!s.is_animating());
}

#[test]
fn lag_bounds_the_catch_up_time() {
    let mut s = Scrub::new(0.6);
    s.set_target(1.0);
    let v = s.advance(0.6);
    assert!(v > 0.98, "got {v}");
}

#[test]
fn jump_and_cancel_stop_motion() {
    let mut s = Scrub::new(0.6);
    s.set_target(1.0);
    s.advance(0.05);
    s.cancel();
    assert!(!s.is_animating());
    let held = s.current();
    assert_eq!(s.advance(1.0), held);

    s.set_target(0.7);
    s.jump(0.0);
    assert_eq!(s.current(), 0.0);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn degenerate_lag_disables_smoothing() {
    assert_eq!(Scrub::new(-1.0).lag_secs(), 0.0);
    assert_eq!(Scrub::new(f64::NAN).lag_secs(), 0.0);
}
