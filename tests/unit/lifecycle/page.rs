use super::*;
use crate::animation::presets::Preset;
use crate::snap::executor::RecordingSink;
use crate::lifecycle::readiness::ReadyReason;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn section(id: &str, height: f64, kind: SectionKind) -> SectionLayout {
    SectionLayout {
        id: SectionId::new(id),
        height,
        kind,
        preset: match kind {
            SectionKind::Pinned => Some(Preset::SplitCard { rows: 1 }),
            SectionKind::Flow => None,
        },
        reveals: Vec::new(),
    }
}

fn layout(config: ScrollConfig) -> PageLayout {
    PageLayout {
        viewport: Viewport::new(1000.0, 1000.0).unwrap(),
        sections: vec![
            section("hero", 1000.0, SectionKind::Pinned),
            section("work", 1000.0, SectionKind::Pinned),
            section("about", 2000.0, SectionKind::Flow),
        ],
        config,
    }
}

fn id(s: &str) -> SectionId {
    SectionId::new(s)
}

#[test]
fn geometry_follows_sections() {
    let page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    let g = page.geometry();
    assert_eq!(g.sections.len(), 3);
    assert!((g.max_scroll - 5600.0).abs() < 1e-9);
    assert_eq!(page.state(), PageState::Unmounted);
}

#[test]
fn mount_is_idempotent_while_pending() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    assert!(page.mount(ms(0)));
    assert!(!page.mount(ms(10)));
    assert_eq!(page.bindings().live_of(BindingKind::SettleTimer), 1);
    assert_eq!(page.state(), PageState::Settling);
}

#[test]
fn barrier_opens_once_every_pinned_section_registered() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_section(&id("hero")).unwrap();
    assert_eq!(page.poll(ms(10)), Readiness::Waiting);
    assert!(page.policy().is_none());

    page.mount_section(&id("work")).unwrap();
    assert_eq!(
        page.poll(ms(20)),
        Readiness::Ready(ReadyReason::AllRegistered)
    );
    assert_eq!(page.state(), PageState::Ready);
    assert_eq!(page.policy().unwrap().ranges().len(), 2);
    assert_eq!(page.bindings().live_of(BindingKind::SettleTimer), 0);
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 1);

    // Polling again never installs a second policy.
    page.poll(ms(30));
    assert!(!page.mount(ms(40)));
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 1);
}

#[test]
fn unmount_before_settling_cancels_the_timer() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.set_expected(None);
    page.mount(ms(0));
    page.mount_sections();
    assert_eq!(page.bindings().live(), 4);

    assert!(page.unmount());
    assert!(!page.unmount());
    assert_eq!(page.bindings().live(), 0);
    assert_eq!(page.poll(ms(10_000)), Readiness::Cancelled);
    assert!(page.policy().is_none());
    assert!(page.registry().is_empty());
}

#[test]
fn late_pinned_section_is_excluded_by_default() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.set_expected(None);
    page.mount(ms(0));
    page.mount_section(&id("hero")).unwrap();
    assert_eq!(page.poll(ms(499)), Readiness::Waiting);
    assert_eq!(page.poll(ms(500)), Readiness::Ready(ReadyReason::TimedOut));
    assert_eq!(page.policy().unwrap().ranges().len(), 1);

    assert!(page.mount_section(&id("work")).unwrap());
    assert_eq!(page.registry().pinned_len(), 2);
    assert_eq!(page.policy().unwrap().ranges().len(), 1);
}

#[test]
fn late_pinned_section_reaggregates_when_configured() {
    let config = ScrollConfig {
        late_mount: LateMountPolicy::Reaggregate,
        ..ScrollConfig::default()
    };
    let mut page = Page::from_layout(&layout(config)).unwrap();
    page.set_expected(None);
    page.mount(ms(0));
    page.mount_section(&id("hero")).unwrap();
    page.poll(ms(600));
    page.mount_section(&id("work")).unwrap();
    assert_eq!(page.policy().unwrap().ranges().len(), 2);
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 1);
}

#[test]
fn unmounting_a_section_rebuilds_the_policy() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));
    assert!(page.unmount_section(&id("work")));
    assert!(!page.unmount_section(&id("work")));
    assert_eq!(page.policy().unwrap().ranges().len(), 1);

    assert!(page.unmount_section(&id("hero")));
    assert!(page.policy().is_none());
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 0);
}

#[test]
fn scroll_end_runs_corrective_scroll_to_center() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));

    // hero spans [0, 1300] of 5600; center at 650.
    let scroll = page.on_scroll_end(900.0).unwrap();
    assert_eq!(scroll.from, 900.0);
    assert!((scroll.to - 650.0).abs() < 1e-9);
    assert_eq!(page.bindings().live_of(BindingKind::CorrectiveScroll), 1);

    let mut sink = RecordingSink::default();
    for _ in 0..30 {
        page.advance(0.016, &mut sink);
    }
    assert!((sink.last().unwrap() - 650.0).abs() < 1e-9);
    assert!((page.offset() - 650.0).abs() < 1e-9);
    assert!(page.corrective().is_none());
    assert_eq!(page.bindings().live_of(BindingKind::CorrectiveScroll), 0);

    // Resting at the center needs no further correction.
    assert!(page.on_scroll_end(page.offset()).is_none());
}

#[test]
fn interrupt_cancels_corrective_scroll() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));
    page.on_scroll_end(1000.0).unwrap();
    assert!(page.interrupt());
    assert!(!page.interrupt());
    let mut sink = RecordingSink::default();
    page.advance(0.016, &mut sink);
    assert!(sink.offsets.is_empty());
    assert_eq!(page.bindings().live_of(BindingKind::CorrectiveScroll), 0);
}

#[test]
fn frames_list_sections_before_snap() {
    let mut page = Page::from_layout(&layout(ScrollConfig::unsmoothed())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));
    let out = page.on_scroll(2300.0 + 520.0);
    assert_eq!(out.sections.len(), 3);
    let work = out.section("work").unwrap();
    assert!(work.pinned);
    assert!((work.progress - 0.4).abs() < 1e-9);
    let snap = out.snap.unwrap();
    assert_eq!(snap.range, Some(1));
    assert!(snap.is_correction());
}

#[test]
fn torn_page_ignores_scroll() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));
    page.unmount();
    let out = page.on_scroll(500.0);
    assert!(out.sections.is_empty());
    assert!(out.snap.is_none());
    assert!(page.on_scroll_end(900.0).is_none());
    let mut sink = RecordingSink::default();
    assert!(page.advance(0.016, &mut sink).sections.is_empty());
    assert!(page.mount_section(&id("hero")).is_err());
}

#[test]
fn page_can_remount_after_teardown() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    page.poll(ms(0));
    page.unmount();

    assert!(page.mount(ms(1000)));
    assert_eq!(page.mount_sections(), 3);
    assert_eq!(
        page.poll(ms(1000)),
        Readiness::Ready(ReadyReason::AllRegistered)
    );
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 1);
    assert_eq!(page.bindings().live_of(BindingKind::SectionScroll), 3);
}

#[test]
fn page_without_pinned_sections_is_free_scroll() {
    let mut page = Page::new(
        ScrollConfig::default(),
        Viewport::new(1000.0, 800.0).unwrap(),
    )
    .unwrap();
    page.add_section(&section("about", 3000.0, SectionKind::Flow))
        .unwrap();
    page.mount(ms(0));
    page.mount_sections();
    assert_eq!(
        page.poll(ms(0)),
        Readiness::Ready(ReadyReason::AllRegistered)
    );
    assert!(page.policy().is_none());
    assert!(page.on_scroll_end(1234.0).is_none());
}

#[test]
fn sections_are_fixed_once_mounted() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    let err = page
        .add_section(&section("late", 500.0, SectionKind::Flow))
        .unwrap_err();
    assert!(err.to_string().contains("after the page mounted"));
    assert!(page.mount_section(&id("missing")).is_err());
}

#[test]
fn first_section_resets_on_leave_back() {
    let mut page = Page::from_layout(&layout(ScrollConfig::default())).unwrap();
    page.mount(ms(0));
    page.mount_sections();
    let mut sink = RecordingSink::default();
    page.on_scroll(1000.0);
    for _ in 0..100 {
        page.advance(0.016, &mut sink);
    }
    let out = page.on_scroll(0.0);
    let hero = out.section("hero").unwrap();
    assert_eq!(hero.visual_progress, 0.0);
    // The entrance does not replay hidden: every element renders settled.
    for t in ["card", "panel", "row.0", "bg"] {
        assert_eq!(
            hero.get(t),
            Some(&crate::foundation::core::VisualState::REST),
            "{t}"
        );
    }
    // Other sections keep their ordinary behaviour.
    assert_eq!(out.section("work").unwrap().get("card").unwrap().opacity, 0.0);
}

#[test]
fn zero_pin_distance_degrades_to_free_scroll() {
    let config = ScrollConfig {
        pin_distance_vh: 0.0,
        ..ScrollConfig::unsmoothed()
    };
    let mut page = Page::from_layout(&layout(config)).unwrap();
    page.mount(ms(0));
    assert_eq!(page.mount_sections(), 3);
    assert_eq!(
        page.poll(ms(0)),
        Readiness::Ready(ReadyReason::AllRegistered)
    );
    assert_eq!(page.registry().pinned_len(), 2);
    assert!(page.policy().is_none());
    assert_eq!(page.bindings().live_of(BindingKind::SnapPolicy), 0);

    for offset in [0.0, 500.0, 1000.0, 1500.0, 2500.0] {
        let out = page.on_scroll(offset);
        assert!(out.snap.is_none());
        for s in ["hero", "work"] {
            assert_eq!(out.section(s).unwrap().progress, 0.0, "{s} at {offset}");
        }
    }
    assert!(page.on_scroll_end(1500.0).is_none());
}
