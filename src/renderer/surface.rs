//! Headless render surface backed by plain data

use std::collections::BTreeSet;

use crate::animation::RenderSurface;
use crate::curve::Segment;

/// Paint state of one mounted segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPaint {
    /// Measured path length
    pub length: f64,
    pub dash_array: f64,
    pub dash_offset: f64,
    pub end_marker_visible: bool,
    /// Number of dash offset writes since mount
    pub offset_writes: usize,
}

/// Records everything the controller does so it can be inspected or rendered
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    segments: Vec<Segment>,
    paints: Vec<SegmentPaint>,
    revealed: BTreeSet<usize>,
    container_visible: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn paint(&self, segment: usize) -> Option<&SegmentPaint> {
        self.paints.get(segment)
    }

    pub fn paints(&self) -> &[SegmentPaint] {
        &self.paints
    }

    pub fn is_end_marker_visible(&self, segment: usize) -> bool {
        self.paints
            .get(segment)
            .is_some_and(|p| p.end_marker_visible)
    }

    pub fn is_anchor_revealed(&self, anchor: usize) -> bool {
        self.revealed.contains(&anchor)
    }

    /// Revealed anchor indices in ascending order
    pub fn revealed_anchors(&self) -> Vec<usize> {
        self.revealed.iter().copied().collect()
    }

    pub fn is_container_visible(&self) -> bool {
        self.container_visible
    }
}

impl RenderSurface for SvgSurface {
    fn mount_segments(&mut self, segments: &[Segment]) {
        self.segments = segments.to_vec();
        self.paints = segments
            .iter()
            .map(|s| SegmentPaint {
                length: s.length(),
                dash_array: 0.0,
                dash_offset: 0.0,
                end_marker_visible: false,
                offset_writes: 0,
            })
            .collect();
    }

    fn path_length(&self, segment: usize) -> f64 {
        self.paints.get(segment).map_or(0.0, |p| p.length)
    }

    fn set_dash_array(&mut self, segment: usize, value: f64) {
        if let Some(paint) = self.paints.get_mut(segment) {
            paint.dash_array = value;
        }
    }

    fn set_dash_offset(&mut self, segment: usize, value: f64) {
        if let Some(paint) = self.paints.get_mut(segment) {
            paint.dash_offset = value;
            paint.offset_writes += 1;
        }
    }

    fn show_end_marker(&mut self, segment: usize) {
        if let Some(paint) = self.paints.get_mut(segment) {
            paint.end_marker_visible = true;
        }
    }

    fn reveal_anchor(&mut self, anchor: usize) {
        self.revealed.insert(anchor);
    }

    fn show_container(&mut self) {
        self.container_visible = true;
    }

    fn unmount(&mut self) {
        self.segments.clear();
        self.paints.clear();
        self.revealed.clear();
        self.container_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{generate_segment, CurveParams, PathOption};
    use crate::geometry::AnchorRect;

    fn segment() -> Segment {
        generate_segment(
            &AnchorRect::new(0.0, 0.0, 100.0, 50.0),
            &AnchorRect::new(0.0, 600.0, 100.0, 50.0),
            &CurveParams::default(),
            &PathOption::neutral().with_curve_points(0),
        )
    }

    #[test]
    fn test_mount_measures_lengths() {
        let mut surface = SvgSurface::new();
        surface.mount_segments(&[segment()]);
        assert!((surface.path_length(0) - 540.0).abs() < 1e-6);
        assert_eq!(surface.path_length(3), 0.0);
        assert!(!surface.is_end_marker_visible(0));
    }

    #[test]
    fn test_records_paint_operations() {
        let mut surface = SvgSurface::new();
        surface.mount_segments(&[segment()]);
        surface.set_dash_array(0, 540.0);
        surface.set_dash_offset(0, 200.0);
        surface.show_end_marker(0);
        surface.reveal_anchor(1);
        surface.show_container();

        let paint = surface.paint(0).expect("mounted");
        assert_eq!(paint.dash_array, 540.0);
        assert_eq!(paint.dash_offset, 200.0);
        assert_eq!(paint.offset_writes, 1);
        assert!(surface.is_end_marker_visible(0));
        assert_eq!(surface.revealed_anchors(), vec![1]);
        assert!(surface.is_container_visible());

        surface.unmount();
        assert_eq!(surface.segment_count(), 0);
        assert!(!surface.is_container_visible());
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut surface = SvgSurface::new();
        surface.set_dash_offset(4, 1.0);
        surface.show_end_marker(4);
        assert!(surface.paint(4).is_none());
    }
}
