//! The hosting view: ties layout, controller, and surface together

use std::time::Duration;

use crate::anchor::AnchorProvider;
use crate::config::RoadLineConfig;
use crate::curve::Segment;
use crate::geometry::Viewport;
use crate::orchestrator::{self, RoadLayout};

use super::controller::ScrollAnimationController;
use super::surface::RenderSurface;

/// A mounted road line.
///
/// Call [`RoadLineView::layout`] on mount and whenever stroke width, surface
/// size or anchor layout change; feed scroll events to
/// [`RoadLineView::scroll`] and give time to [`RoadLineView::tick`].
#[derive(Debug)]
pub struct RoadLineView<H> {
    config: RoadLineConfig,
    segments: Vec<Segment>,
    controller: ScrollAnimationController<H>,
}

impl<H: Clone> RoadLineView<H> {
    pub fn new(config: RoadLineConfig) -> Self {
        let controller = ScrollAnimationController::from_config(&config);
        Self {
            config,
            segments: Vec::new(),
            controller,
        }
    }

    pub fn config(&self) -> &RoadLineConfig {
        &self.config
    }

    /// Mutable access to the configuration; call `layout` afterwards to apply it
    pub fn config_mut(&mut self) -> &mut RoadLineConfig {
        &mut self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn controller(&self) -> &ScrollAnimationController<H> {
        &self.controller
    }

    /// Recompute geometry from the live anchors and remount everything.
    ///
    /// Pending timers from the previous layout are cancelled; segments that
    /// had started drawing stay drawn.
    pub fn layout<P, S>(&mut self, provider: &P, surface: &mut S, viewport: &Viewport, now: Duration)
    where
        P: AnchorProvider<Handle = H>,
        S: RenderSurface,
    {
        let anchors = provider.anchors();
        let RoadLayout { segments, states } =
            orchestrator::layout(&anchors, &self.config, self.controller.states());

        self.controller
            .set_timing(self.config.animation_gap, self.config.animation_time);
        surface.mount_segments(&segments);
        self.segments = segments;
        self.controller.mount(states, surface, viewport, now);
    }

    pub fn scroll<S: RenderSurface>(&mut self, surface: &mut S, viewport: &Viewport, now: Duration) {
        self.controller.on_scroll(surface, viewport, now);
    }

    pub fn tick<S: RenderSurface>(&mut self, surface: &mut S, now: Duration) -> usize {
        self.controller.tick(surface, now)
    }

    /// Fire timers in due order until none remain, returning the final time
    pub fn settle<S: RenderSurface>(&mut self, surface: &mut S, mut now: Duration) -> Duration {
        while let Some(due) = self.controller.next_due() {
            now = now.max(due);
            self.controller.tick(surface, now);
        }
        now
    }

    /// Tear down: cancel timers, stop listening, clear the surface
    pub fn unmount<S: RenderSurface>(&mut self, surface: &mut S) {
        self.controller.unmount();
        surface.unmount();
        self.segments.clear();
    }
}
