use super::*;

fn iv(start: f64, end: f64) -> ScrollInterval {
    ScrollInterval::new(start, end).unwrap()
}

#[test]
fn clamps_outside_interval() {
    let i = iv(1000.0, 2300.0);
    for s in [-5.0, 0.0, 999.9] {
        assert_eq!(local_progress(s, i), 0.0);
    }
    for s in [2300.1, 5000.0, f64::MAX] {
        assert_eq!(local_progress(s, i), 1.0);
    }
}

#[test]
fn linear_inside_interval() {
    let i = iv(1000.0, 2000.0);
    assert_eq!(local_progress(1000.0, i), 0.0);
    assert_eq!(local_progress(1250.0, i), 0.25);
    assert_eq!(local_progress(2000.0, i), 1.0);
}

#[test]
fn zero_length_interval_degrades_to_zero() {
    let i = iv(500.0, 500.0);
    for s in [0.0, 500.0, 900.0] {
        assert_eq!(local_progress(s, i), 0.0);
    }
    assert_eq!(local_progress(f64::NAN, iv(0.0, 10.0)), 0.0);
}

#[test]
fn side_classification() {
    let i = iv(10.0, 20.0);
    assert_eq!(Side::of(9.0, i), Side::Before);
    assert_eq!(Side::of(10.0, i), Side::Inside);
    assert_eq!(Side::of(20.0, i), Side::Inside);
    assert_eq!(Side::of(21.0, i), Side::After);
}
