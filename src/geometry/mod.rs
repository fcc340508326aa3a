//! Geometry primitives shared by the curve generator and the animation layer
//!
//! Everything here is pure: page-relative rectangles, points, and the
//! attachment coordinates of the eight named anchor positions.

pub mod position;
pub mod types;

pub use position::{element_x, element_x_with, element_y, element_y_with, AnchorPosition};
pub use types::*;

/// Restrict `value` to the inclusive range `[min, max]`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}
