use super::*;

#[test]
fn acquire_release_exactly_once() {
    let mut b = Bindings::new();
    let a = b.acquire(BindingKind::SectionScroll);
    let c = b.acquire(BindingKind::SectionScroll);
    let t = b.acquire(BindingKind::SettleTimer);
    assert_eq!(b.live(), 3);
    assert_eq!(b.live_of(BindingKind::SectionScroll), 2);

    assert!(b.release(a));
    assert!(!b.release(a));
    assert!(!b.is_live(a));
    assert!(b.is_live(c));
    assert_eq!(b.released(), 1);

    assert!(b.release(t));
    assert_eq!(b.live_of(BindingKind::SettleTimer), 0);
}

#[test]
fn release_all_empties_the_ledger() {
    let mut b = Bindings::new();
    let id = b.acquire(BindingKind::SnapPolicy);
    b.acquire(BindingKind::CorrectiveScroll);
    assert_eq!(b.release_all(), 2);
    assert_eq!(b.live(), 0);
    assert!(!b.release(id));
    assert_eq!(b.released(), 2);
    assert_eq!(b.release_all(), 0);
}
