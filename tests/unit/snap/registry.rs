use super::*;

fn iv(start: f64, end: f64) -> ScrollInterval {
    ScrollInterval::new(start, end).unwrap()
}

#[test]
fn register_and_unregister_tokens() {
    let mut r = RangeRegistry::new();
    let a = r.register(iv(0.0, 100.0), RangeKind::Pinned);
    let b = r.register(iv(200.0, 300.0), RangeKind::Reveal);
    assert_ne!(a, b);
    assert_eq!(r.len(), 2);
    assert_eq!(r.pinned_len(), 1);
    assert_eq!(r.get(b), Some(iv(200.0, 300.0)));

    assert!(r.unregister(a));
    assert!(!r.unregister(a));
    assert_eq!(r.len(), 1);
    assert_eq!(r.pinned_len(), 0);
}

#[test]
fn snapshot_is_pinned_only_and_sorted() {
    let mut r = RangeRegistry::new();
    r.register(iv(400.0, 500.0), RangeKind::Pinned);
    r.register(iv(50.0, 60.0), RangeKind::Reveal);
    r.register(iv(0.0, 200.0), RangeKind::Pinned);

    let snap = r.snapshot(1000.0);
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[0], NormalizedRange::new(0.0, 0.2));
    assert_eq!(snap[1], NormalizedRange::new(0.4, 0.5));
}

#[test]
fn snapshot_clamps_past_page_end() {
    let mut r = RangeRegistry::new();
    r.register(iv(800.0, 1300.0), RangeKind::Pinned);
    let snap = r.snapshot(1000.0);
    assert_eq!(snap[0].end, 1.0);
    assert!((snap[0].center - 0.9).abs() < 1e-12);
}

#[test]
fn zero_length_and_excluded_ranges_do_not_snap() {
    let mut r = RangeRegistry::new();
    r.register(iv(100.0, 100.0), RangeKind::Pinned);
    let late = r.register(iv(200.0, 400.0), RangeKind::Pinned);
    assert!(r.exclude_from_snapping(late));
    assert!(r.snapshot(1000.0).is_empty());
    assert_eq!(r.pinned_len(), 2);
}

#[test]
fn compute_ranges_without_ranges_is_none() {
    let cfg = ScrollConfig::default();
    let mut r = RangeRegistry::new();
    assert!(r.compute_ranges(1000.0, &cfg).is_none());

    r.register(iv(0.0, 100.0), RangeKind::Pinned);
    assert!(r.compute_ranges(0.0, &cfg).is_none());

    let policy = r.compute_ranges(1000.0, &cfg).unwrap();
    assert_eq!(policy.ranges().len(), 1);
    assert_eq!(policy.buffer(), cfg.snap_buffer);
    assert!((policy.snap_to(0.06) - 0.05).abs() < 1e-12);
}
