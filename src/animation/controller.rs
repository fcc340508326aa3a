//! Scroll animation state machine
//!
//! Per segment: `NotReady -> Animating -> Done`. A segment starts animating
//! when the trigger line (`scroll_y + viewport height - animation_gap`)
//! passes its anchor's top. Each animation counts the stroke dash offset
//! down from the full path length to zero on its own timer.

use std::time::Duration;

use crate::config::RoadLineConfig;
use crate::geometry::Viewport;
use crate::orchestrator::SegmentRuntimeState;
use crate::timer::{Interpolation, TimerQueue, STEP_INTERVAL};

use super::surface::RenderSurface;

/// Where a segment is in its draw-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPhase {
    NotReady,
    Animating,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Task {
    /// One interpolation step of a segment's dash offset
    DrawStep {
        segment: usize,
        interpolation: Interpolation,
    },
    /// Fade in the anchor a finished segment leads to
    Reveal { anchor: usize },
}

/// Owns the per-anchor runtime state and every pending animation timer
#[derive(Debug)]
pub struct ScrollAnimationController<H> {
    animation_gap: f64,
    animation_time: Duration,
    states: Vec<SegmentRuntimeState<H>>,
    phases: Vec<SegmentPhase>,
    timers: TimerQueue<Task>,
    listening: bool,
}

impl<H> ScrollAnimationController<H> {
    pub fn new(animation_gap: f64, animation_time: Duration) -> Self {
        Self {
            animation_gap,
            animation_time,
            states: Vec::new(),
            phases: Vec::new(),
            timers: TimerQueue::new(),
            listening: false,
        }
    }

    pub fn from_config(config: &RoadLineConfig) -> Self {
        Self::new(config.animation_gap, config.animation_time)
    }

    /// Update timing; takes effect for animations started afterwards
    pub fn set_timing(&mut self, animation_gap: f64, animation_time: Duration) {
        self.animation_gap = animation_gap;
        self.animation_time = animation_time;
    }

    pub fn states(&self) -> &[SegmentRuntimeState<H>] {
        &self.states
    }

    pub fn phases(&self) -> &[SegmentPhase] {
        &self.phases
    }

    pub fn phase(&self, segment: usize) -> Option<SegmentPhase> {
        self.phases.get(segment).copied()
    }

    /// Whether scroll events are still being handled
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the next pending timer is due
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Scroll offset line that segment triggers are compared against
    pub fn trigger_line(&self, viewport: &Viewport) -> f64 {
        viewport.scroll_y + viewport.height - self.animation_gap
    }

    /// Take over a freshly laid out set of runtime states.
    ///
    /// Cancels everything pending from a previous mount. Segments already
    /// flagged `animated` are restored as done without replaying. Finishes
    /// with one scroll check so segments already in view start at once.
    pub fn mount<S: RenderSurface>(
        &mut self,
        states: Vec<SegmentRuntimeState<H>>,
        surface: &mut S,
        viewport: &Viewport,
        now: Duration,
    ) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::debug!("mount: cancelled {} pending timers", cancelled);
        }

        let segment_count = states.len().saturating_sub(1);
        self.states = states;
        self.phases = vec![SegmentPhase::NotReady; segment_count];

        surface.show_container();
        if segment_count > 0 {
            surface.reveal_anchor(0);
        }

        for segment in 0..segment_count {
            let length = surface.path_length(segment);
            surface.set_dash_array(segment, length);
            if self.states[segment].animated {
                surface.set_dash_offset(segment, 0.0);
                surface.show_end_marker(segment);
                surface.reveal_anchor(segment + 1);
                self.phases[segment] = SegmentPhase::Done;
            } else {
                surface.set_dash_offset(segment, length);
            }
        }

        self.listening = true;
        log::info!(
            "mounted {} segments ({} already drawn)",
            segment_count,
            self.phases
                .iter()
                .filter(|p| **p == SegmentPhase::Done)
                .count()
        );

        self.check_scroll(surface, viewport, now);
        self.detach_if_done();
    }

    /// Handle a scroll event
    pub fn on_scroll<S: RenderSurface>(&mut self, surface: &mut S, viewport: &Viewport, now: Duration) {
        if !self.listening {
            return;
        }
        self.check_scroll(surface, viewport, now);
        self.detach_if_done();
    }

    /// Fire every timer due at or before `now`, returning how many fired
    pub fn tick<S: RenderSurface>(&mut self, surface: &mut S, now: Duration) -> usize {
        let mut fired = 0;
        while let Some((_, task)) = self.timers.pop_due(now) {
            fired += 1;
            match task {
                Task::DrawStep {
                    segment,
                    interpolation,
                } => self.draw_step(segment, interpolation, surface, now),
                Task::Reveal { anchor } => {
                    log::debug!("reveal anchor {}", anchor);
                    surface.reveal_anchor(anchor);
                }
            }
        }
        self.detach_if_done();
        fired
    }

    /// Stop listening and cancel every pending timer
    pub fn unmount(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.listening = false;
        log::info!("unmounted, cancelled {} pending timers", cancelled);
    }

    fn check_scroll<S: RenderSurface>(&mut self, surface: &mut S, viewport: &Viewport, now: Duration) {
        let trigger = self.trigger_line(viewport);
        for segment in 0..self.phases.len() {
            let state = &self.states[segment];
            if self.phases[segment] == SegmentPhase::NotReady
                && !state.animated
                && trigger > state.position
            {
                self.start_animation(segment, surface, now);
            }
        }
    }

    fn start_animation<S: RenderSurface>(&mut self, segment: usize, surface: &mut S, now: Duration) {
        let length = surface.path_length(segment);
        log::debug!(
            "segment {} starts drawing ({:.1} px over {:?})",
            segment,
            length,
            self.animation_time
        );

        self.states[segment].animated = true;
        self.phases[segment] = SegmentPhase::Animating;
        self.timers.schedule(
            now + self.animation_time,
            Task::Reveal {
                anchor: segment + 1,
            },
        );

        let interpolation = Interpolation::new(length, self.animation_time, now);
        self.draw_step(segment, interpolation, surface, now);
    }

    fn draw_step<S: RenderSurface>(
        &mut self,
        segment: usize,
        interpolation: Interpolation,
        surface: &mut S,
        now: Duration,
    ) {
        surface.set_dash_offset(segment, interpolation.value_at(now));
        if interpolation.is_finished(now) {
            self.phases[segment] = SegmentPhase::Done;
            surface.show_end_marker(segment);
            log::debug!("segment {} done", segment);
        } else {
            self.timers.schedule(
                now + STEP_INTERVAL,
                Task::DrawStep {
                    segment,
                    interpolation,
                },
            );
        }
    }

    fn detach_if_done(&mut self) {
        if self.listening && self.phases.iter().all(|p| *p == SegmentPhase::Done) {
            self.listening = false;
            log::info!("every segment drawn, scroll listener removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{AnchorProvider, StaticAnchors};
    use crate::geometry::AnchorRect;
    use crate::orchestrator::layout;
    use crate::renderer::SvgSurface;

    const MS: Duration = Duration::from_millis(1);

    fn setup(
        previous: &[SegmentRuntimeState<usize>],
    ) -> (ScrollAnimationController<usize>, SvgSurface, Vec<SegmentRuntimeState<usize>>) {
        let config = RoadLineConfig::default();
        let anchors = StaticAnchors::new(vec![
            AnchorRect::new(0.0, 0.0, 100.0, 50.0),
            AnchorRect::new(0.0, 1000.0, 100.0, 50.0),
            AnchorRect::new(0.0, 2000.0, 100.0, 50.0),
        ])
        .anchors();
        let result = layout(&anchors, &config, previous);
        let mut surface = SvgSurface::new();
        surface.mount_segments(&result.segments);
        (
            ScrollAnimationController::from_config(&config),
            surface,
            result.states,
        )
    }

    #[test]
    fn test_mount_animates_segments_in_initial_view() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        // Trigger line: 0 + 720 - 150 = 570 > 0, < 1000
        ctrl.mount(states, &mut surface, &Viewport::default(), Duration::ZERO);
        assert_eq!(
            ctrl.phases(),
            &[SegmentPhase::Animating, SegmentPhase::NotReady]
        );
        assert!(ctrl.is_listening());
        assert!(surface.is_anchor_revealed(0));
        assert!(surface.is_container_visible());
    }

    #[test]
    fn test_animation_completes_and_reveals_next_anchor() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        ctrl.mount(states, &mut surface, &Viewport::default(), Duration::ZERO);
        let length = surface.path_length(0);
        assert_eq!(surface.paint(0).map(|p| p.dash_offset), Some(length));

        ctrl.tick(&mut surface, 300 * MS);
        let halfway = surface.paint(0).map(|p| p.dash_offset).unwrap_or_default();
        assert!(halfway < length && halfway > 0.0);
        assert!(!surface.is_end_marker_visible(0));
        assert!(!surface.is_anchor_revealed(1));

        ctrl.tick(&mut surface, 600 * MS);
        assert_eq!(ctrl.phase(0), Some(SegmentPhase::Done));
        assert_eq!(surface.paint(0).map(|p| p.dash_offset), Some(0.0));
        assert!(surface.is_end_marker_visible(0));
        assert!(surface.is_anchor_revealed(1));
        assert_eq!(ctrl.pending_timers(), 0);
    }

    #[test]
    fn test_scroll_triggers_only_crossed_segments() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        ctrl.mount(states, &mut surface, &Viewport::default(), Duration::ZERO);
        // Trigger line 1100: past anchor 1 (1000), not anchor 2 (2000)
        let viewport = Viewport::default().scrolled_to(530.0);
        ctrl.on_scroll(&mut surface, &viewport, 10 * MS);
        assert_eq!(
            ctrl.phases(),
            &[SegmentPhase::Animating, SegmentPhase::Animating]
        );
    }

    #[test]
    fn test_trigger_is_strict() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        // Trigger line exactly 0 does not pass the first anchor at 0
        let viewport = Viewport::new(800.0, 150.0);
        ctrl.mount(states, &mut surface, &viewport, Duration::ZERO);
        assert_eq!(
            ctrl.phases(),
            &[SegmentPhase::NotReady, SegmentPhase::NotReady]
        );
    }

    #[test]
    fn test_listener_detaches_when_all_done() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        let viewport = Viewport::default().scrolled_to(5000.0);
        ctrl.mount(states, &mut surface, &viewport, Duration::ZERO);
        assert!(ctrl.is_listening());
        ctrl.tick(&mut surface, Duration::from_secs(1));
        assert!(!ctrl.is_listening());
        assert_eq!(ctrl.phases(), &[SegmentPhase::Done, SegmentPhase::Done]);
    }

    #[test]
    fn test_already_animated_is_restored_without_timer() {
        let (_, _, mut previous) = setup(&[]);
        previous[0].animated = true;
        let (mut ctrl, mut surface, states) = setup(&previous);
        ctrl.mount(states, &mut surface, &Viewport::new(800.0, 100.0), Duration::ZERO);
        assert_eq!(ctrl.phase(0), Some(SegmentPhase::Done));
        assert_eq!(surface.paint(0).map(|p| p.dash_offset), Some(0.0));
        assert!(surface.is_end_marker_visible(0));
        assert!(surface.is_anchor_revealed(1));
        assert_eq!(ctrl.pending_timers(), 0);
    }

    #[test]
    fn test_unmount_cancels_timers() {
        let (mut ctrl, mut surface, states) = setup(&[]);
        ctrl.mount(states, &mut surface, &Viewport::default(), Duration::ZERO);
        assert!(ctrl.pending_timers() > 0);
        ctrl.unmount();
        assert_eq!(ctrl.pending_timers(), 0);
        assert!(!ctrl.is_listening());

        let before = surface.paint(0).map(|p| p.dash_offset);
        assert_eq!(ctrl.tick(&mut surface, Duration::from_secs(5)), 0);
        assert_eq!(surface.paint(0).map(|p| p.dash_offset), before);

        // Scroll after unmount is ignored
        ctrl.on_scroll(&mut surface, &Viewport::default().scrolled_to(9000.0), 6 * MS);
        assert_eq!(ctrl.phase(1), Some(SegmentPhase::NotReady));
    }

    #[test]
    fn test_no_segments_detaches_immediately() {
        let mut ctrl: ScrollAnimationController<usize> =
            ScrollAnimationController::new(150.0, Duration::from_millis(600));
        let mut surface = SvgSurface::new();
        ctrl.mount(Vec::new(), &mut surface, &Viewport::default(), Duration::ZERO);
        assert!(ctrl.phases().is_empty());
        assert!(!ctrl.is_listening());
        assert!(!surface.is_anchor_revealed(0));
    }
}
