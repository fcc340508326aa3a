//! Scroll-driven draw-in behaviour, replayed on virtual time

use std::cell::RefCell;
use std::time::Duration;

use pretty_assertions::assert_eq;

use road_line::timer::{count_down_with, Clock, ManualClock};
use road_line::{
    AnchorRect, RenderSurface, RoadLineConfig, RoadLineView, SegmentPhase, StaticAnchors,
    SvgSurface, Viewport,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Four anchors a thousand pixels apart
fn page() -> StaticAnchors {
    StaticAnchors::new(
        (0..4)
            .map(|i| AnchorRect::new(200.0, i as f64 * 1000.0, 400.0, 100.0))
            .collect(),
    )
}

fn mounted(viewport: &Viewport) -> (RoadLineView<usize>, SvgSurface) {
    let mut view = RoadLineView::new(RoadLineConfig::default());
    let mut surface = SvgSurface::new();
    view.layout(&page(), &mut surface, viewport, Duration::ZERO);
    (view, surface)
}

fn offset(surface: &SvgSurface, segment: usize) -> f64 {
    surface.paint(segment).map_or(f64::NAN, |p| p.dash_offset)
}

#[test]
fn test_mount_hides_every_segment_and_starts_the_visible_one() {
    let (view, surface) = mounted(&Viewport::default());

    assert!(surface.is_container_visible());
    assert_eq!(surface.revealed_anchors(), vec![0]);
    assert_eq!(
        view.controller().phases(),
        &[SegmentPhase::Animating, SegmentPhase::NotReady, SegmentPhase::NotReady]
    );
    for segment in 0..3 {
        let paint = surface.paint(segment).expect("mounted");
        assert_eq!(paint.dash_array, paint.length);
        assert_eq!(paint.dash_offset, paint.length);
        assert!(!paint.end_marker_visible);
    }
}

#[test]
fn test_dash_offset_counts_down_linearly() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    let length = surface.path_length(0);

    let mut previous = offset(&surface, 0);
    for step in 1..=6 {
        view.tick(&mut surface, ms(step * 100));
        let current = offset(&surface, 0);
        assert!(current < previous);
        let expected = length * (1.0 - step as f64 / 6.0);
        assert!((current - expected).abs() < 1e-6, "step {}", step);
        previous = current;
    }

    assert_eq!(offset(&surface, 0), 0.0);
    assert_eq!(view.controller().phase(0), Some(SegmentPhase::Done));
    assert!(surface.is_end_marker_visible(0));
}

#[test]
fn test_next_anchor_is_revealed_when_the_animation_time_elapses() {
    let (mut view, mut surface) = mounted(&Viewport::default());

    view.tick(&mut surface, ms(599));
    assert!(!surface.is_anchor_revealed(1));
    view.tick(&mut surface, ms(600));
    assert!(surface.is_anchor_revealed(1));
    assert!(!surface.is_anchor_revealed(2));
}

#[test]
fn test_scrolling_starts_segments_as_their_anchor_passes_the_trigger_line() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    let now = view.settle(&mut surface, Duration::ZERO);

    // 400 + 720 - 150 = 970, still above anchor 1 at 1000
    view.scroll(&mut surface, &Viewport::default().scrolled_to(400.0), now);
    assert_eq!(view.controller().phase(1), Some(SegmentPhase::NotReady));

    view.scroll(&mut surface, &Viewport::default().scrolled_to(500.0), now);
    assert_eq!(view.controller().phase(1), Some(SegmentPhase::Animating));
    assert_eq!(view.controller().phase(2), Some(SegmentPhase::NotReady));
    assert!(view.controller().is_listening());
}

#[test]
fn test_jumping_to_the_bottom_starts_every_remaining_segment_at_once() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    view.scroll(&mut surface, &Viewport::default().scrolled_to(5000.0), ms(10));

    assert_eq!(
        view.controller().phases(),
        &[SegmentPhase::Animating, SegmentPhase::Animating, SegmentPhase::Animating]
    );

    // Segment 0 started at 0, the others at 10ms
    view.tick(&mut surface, ms(600));
    assert_eq!(view.controller().phase(0), Some(SegmentPhase::Done));
    assert_eq!(view.controller().phase(1), Some(SegmentPhase::Animating));
    view.tick(&mut surface, ms(610));
    assert!(view.controller().phases().iter().all(|p| *p == SegmentPhase::Done));
    assert_eq!(surface.revealed_anchors(), vec![0, 1, 2, 3]);
}

#[test]
fn test_listener_detaches_once_everything_is_drawn() {
    let (mut view, mut surface) = mounted(&Viewport::default().scrolled_to(5000.0));
    assert!(view.controller().is_listening());

    let now = view.settle(&mut surface, Duration::ZERO);
    assert!(!view.controller().is_listening());

    let writes = surface.paint(2).map(|p| p.offset_writes);
    view.scroll(&mut surface, &Viewport::default(), now);
    assert_eq!(surface.paint(2).map(|p| p.offset_writes), writes);
}

#[test]
fn test_segments_never_animate_twice() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    let now = view.settle(&mut surface, Duration::ZERO);
    let writes = surface.paint(0).map(|p| p.offset_writes);

    // Scroll back up and down again
    view.scroll(&mut surface, &Viewport::default().scrolled_to(0.0), now);
    view.scroll(&mut surface, &Viewport::default().scrolled_to(100.0), now);
    view.settle(&mut surface, now);

    assert_eq!(surface.paint(0).map(|p| p.offset_writes), writes);
}

#[test]
fn test_relayout_mid_animation_cancels_timers_and_keeps_progress() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    view.tick(&mut surface, ms(300));
    assert!(view.controller().pending_timers() > 0);

    view.layout(&page(), &mut surface, &Viewport::default(), ms(300));
    assert_eq!(view.controller().pending_timers(), 0);
    assert_eq!(view.controller().phase(0), Some(SegmentPhase::Done));
    assert_eq!(offset(&surface, 0), 0.0);
    assert!(surface.is_end_marker_visible(0));
    assert!(surface.is_anchor_revealed(1));
    assert_eq!(offset(&surface, 1), surface.path_length(1));
}

#[test]
fn test_unmount_stops_everything() {
    let (mut view, mut surface) = mounted(&Viewport::default());
    view.unmount(&mut surface);

    assert_eq!(view.controller().pending_timers(), 0);
    assert!(!view.controller().is_listening());
    assert_eq!(view.tick(&mut surface, ms(1000)), 0);
}

#[test]
fn test_count_down_on_a_manual_clock() {
    let clock = ManualClock::new();
    let values = RefCell::new(Vec::new());
    count_down_with(
        &clock,
        |step| clock.advance(step * 100),
        |value| values.borrow_mut().push(value),
        400.0,
        ms(400),
    );

    let rounded: Vec<f64> = values.into_inner().iter().map(|v| v.round()).collect();
    assert_eq!(rounded, vec![400.0, 300.0, 200.0, 100.0, 0.0]);
    assert_eq!(clock.now(), ms(400));
}
