//! Curve generation between consecutive anchors
//!
//! Turns two anchor rectangles plus a [`PathOption`] into a [`Segment`]:
//! endpoints on the rectangles, intermediate points offset to alternating
//! sides of the straight line between them, and a smooth path through all of
//! them.

pub mod generator;
pub mod option;
pub mod path;
pub mod smooth;

pub use generator::{generate_segment, CurveParams, Segment, DEFAULT_CURVE_POINTS, MAX_CURVE_POINTS};
pub use option::{ControlPointSpec, PathOption, PointPath, StyleTable};
pub use path::{fmt_num, PathCommand};
pub use smooth::{control_points, smooth_commands, DEFAULT_TENSION};
