use super::*;

fn policy(ranges: &[(f64, f64)]) -> SnapPolicy {
    SnapPolicy::new(
        ranges
            .iter()
            .map(|&(s, e)| NormalizedRange::new(s, e))
            .collect(),
        0.02,
        DurationRange {
            min: 0.15,
            max: 0.35,
        },
        Ease::OutCubic,
    )
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn single_range_scenario() {
    let p = policy(&[(0.10, 0.30)]);
    assert!(approx(p.snap_to(0.22), 0.20));
    assert_eq!(p.snap_to(0.50), 0.50);
    // Buffer edges.
    assert!(approx(p.snap_to(0.085), 0.20));
    assert_eq!(p.snap_to(0.075), 0.075);
    assert!(approx(p.snap_to(0.315), 0.20));
}

#[test]
fn two_range_scenario() {
    let p = policy(&[(0.0, 0.2), (0.4, 0.5)]);
    assert_eq!(p.snap_to(0.25), 0.25);
    assert!(approx(p.snap_to(0.41), 0.45));
    assert!(approx(p.snap_to(0.21), 0.1));
    assert!(approx(p.snap_to(0.0), 0.1));
}

#[test]
fn free_scroll_values_are_identity() {
    let p = policy(&[(0.1, 0.2), (0.6, 0.7)]);
    let mut v = 0.0;
    while v <= 1.0 {
        let inside = p.ranges().iter().any(|r| r.contains_buffered(v, 0.02));
        if !inside {
            assert_eq!(p.snap_to(v), v);
            assert!(!p.decide(v).is_correction());
        }
        v += 0.001;
    }
}

#[test]
fn buffered_values_go_to_nearest_center() {
    let p = policy(&[(0.1, 0.2), (0.19, 0.3)]);
    let mut v = 0.08;
    while v <= 0.32 {
        let target = p.snap_to(v);
        let best = p
            .ranges()
            .iter()
            .map(|r| (r.center - v).abs())
            .fold(f64::INFINITY, f64::min);
        assert!(approx((target - v).abs(), best), "v={v}");
        v += 0.0005;
    }
}

#[test]
fn ties_resolve_to_first_range() {
    // Overlapping ranges sharing an exactly representable center.
    let p = SnapPolicy::new(
        vec![NormalizedRange::new(0.0, 0.5), NormalizedRange::new(0.125, 0.375)],
        0.02,
        DurationRange { min: 0.15, max: 0.35 },
        Ease::OutCubic,
    );
    assert_eq!(p.ranges()[0].center, p.ranges()[1].center);
    assert_eq!(p.decide(0.25).range, Some(0));
    assert_eq!(p.decide(0.3).range, Some(0));

    // Equidistant centers: 0.375 is 0.125 from both 0.25 and 0.5.
    let p = policy(&[(0.0, 0.5), (0.25, 0.75)]);
    let d = p.decide(0.375);
    assert_eq!(d.range, Some(0));
    assert_eq!(d.target, 0.25);
}

#[test]
fn empty_policy_is_identity() {
    let p = SnapPolicy::identity(DurationRange { min: 0.15, max: 0.35 }, Ease::OutCubic);
    assert!(p.is_identity());
    for v in [0.0, 0.2, 0.5, 1.0] {
        assert_eq!(p.snap_to(v), v);
    }
    assert!(p.snap_to(f64::NAN).is_nan());
}
