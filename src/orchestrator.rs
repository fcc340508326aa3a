//! Path orchestration: anchors in, segments and runtime state out
//!
//! Each pass recomputes every segment from the live anchor rectangles. The
//! only thing carried over from a previous pass is whether a segment has
//! already been drawn, matched by anchor index.

use crate::anchor::Anchor;
use crate::config::RoadLineConfig;
use crate::curve::{generate_segment, Segment};

/// Per-anchor animation bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRuntimeState<H> {
    /// Anchor element this entry was taken from
    pub target: H,
    /// Page-relative top of the anchor, used as the scroll trigger
    pub position: f64,
    /// Set once the segment leaving this anchor has started drawing; never cleared
    pub animated: bool,
}

/// Everything one layout pass produces
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLayout<H> {
    /// One per consecutive anchor pair
    pub segments: Vec<Segment>,
    /// One per anchor
    pub states: Vec<SegmentRuntimeState<H>>,
}

impl<H> RoadLayout<H> {
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            states: Vec::new(),
        }
    }
}

/// Compute the segment between every pair of consecutive anchors.
///
/// Fewer than two anchors yields no segments.
pub fn build_paths<H>(anchors: &[Anchor<H>], config: &RoadLineConfig) -> Vec<Segment> {
    if anchors.len() < 2 {
        log::warn!(
            "{} road-line anchor(s) found, at least two are needed for a segment",
            anchors.len()
        );
        return Vec::new();
    }

    let params = config.curve_params();
    anchors
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let option = config.styles.style_for(index);
            generate_segment(&pair[0].rect, &pair[1].rect, &params, option)
        })
        .collect()
}

/// Fresh runtime state for every anchor, keeping `animated` from `previous` by index
pub fn runtime_states<H: Clone>(
    anchors: &[Anchor<H>],
    previous: &[SegmentRuntimeState<H>],
) -> Vec<SegmentRuntimeState<H>> {
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| SegmentRuntimeState {
            target: anchor.handle.clone(),
            position: anchor.rect.top,
            animated: previous.get(index).is_some_and(|p| p.animated),
        })
        .collect()
}

/// One full layout pass
pub fn layout<H: Clone>(
    anchors: &[Anchor<H>],
    config: &RoadLineConfig,
    previous: &[SegmentRuntimeState<H>],
) -> RoadLayout<H> {
    let segments = build_paths(anchors, config);
    let states = runtime_states(anchors, previous);
    log::debug!(
        "layout: {} anchors, {} segments, {} already animated",
        states.len(),
        segments.len(),
        states.iter().filter(|s| s.animated).count()
    );
    RoadLayout { segments, states }
}
