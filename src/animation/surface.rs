//! The seam between the animation controller and whatever draws the roads

use crate::curve::Segment;

/// Operations the controller performs on the rendered output.
///
/// Segment and anchor indices follow the order the segments were mounted in.
pub trait RenderSurface {
    /// Replace the rendered segments; end markers start hidden
    fn mount_segments(&mut self, segments: &[Segment]);

    /// Total drawn length of a mounted segment
    fn path_length(&self, segment: usize) -> f64;

    fn set_dash_array(&mut self, segment: usize, value: f64);

    fn set_dash_offset(&mut self, segment: usize, value: f64);

    /// Make the end marker `end-road-{segment}` visible
    fn show_end_marker(&mut self, segment: usize);

    /// Swap an anchor's pending style for its visible one
    fn reveal_anchor(&mut self, anchor: usize);

    /// Make the whole road container visible
    fn show_container(&mut self);

    /// Remove everything mounted
    fn unmount(&mut self);
}
