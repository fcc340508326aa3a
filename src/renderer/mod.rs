//! SVG output for road lines
//!
//! [`SvgSurface`] is a headless [`crate::animation::RenderSurface`] that
//! records paint state; [`render_svg`] turns that state into an SVG string
//! with CSS classes for styling.

pub mod config;
pub mod surface;
pub mod svg;

pub use config::SvgConfig;
pub use surface::{SegmentPaint, SvgSurface};
pub use svg::{end_marker_id, render_svg, END_ROAD_MARKER};
