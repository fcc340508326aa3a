//! Segment generation between two anchor rectangles

use crate::geometry::{element_x, element_y, AnchorPosition, AnchorRect, Point};

use super::option::{PathOption, PointPath};
use super::path::{commands_to_svg, fmt_num, path_length, PathCommand};
use super::smooth::{smooth_commands, DEFAULT_TENSION};

/// Intermediate points used when a path option does not say otherwise
pub const DEFAULT_CURVE_POINTS: i32 = 3;

/// Upper bound on intermediate points per segment
pub const MAX_CURVE_POINTS: usize = 256;

/// Inputs shared by every segment of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct CurveParams {
    /// Global vertical gap added to both endpoints
    pub top_gap: f64,
    /// Global horizontal gap added to both endpoints
    pub left_gap: f64,
    pub stroke_width: f64,
    /// Perpendicular offset of every curve point; computed from the span when unset
    pub default_distance: Option<f64>,
    /// Side of the first curve point (+1 or -1)
    pub default_opposite: f64,
    /// Flip sides between consecutive curve points
    pub enable_opposite: bool,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            top_gap: 0.0,
            left_gap: 0.0,
            stroke_width: 4.0,
            default_distance: None,
            default_opposite: -1.0,
            enable_opposite: true,
        }
    }
}

/// The drawable unit between anchor `i` and anchor `i + 1`
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_point: Point,
    pub end_point: Point,
    /// Start point, curve points, end point
    pub points: Vec<Point>,
    /// Commands after the initial move to `start_point`
    pub commands: Vec<PathCommand>,
}

impl Segment {
    /// Path commands without the leading move
    pub fn path(&self) -> String {
        commands_to_svg(&self.commands)
    }

    /// Full SVG `d` attribute
    pub fn d(&self) -> String {
        let mv = format!(
            "M{} {}",
            fmt_num(self.start_point.x),
            fmt_num(self.start_point.y)
        );
        if self.commands.is_empty() {
            mv
        } else {
            format!("{} {}", mv, self.path())
        }
    }

    /// Drawn length of the path
    pub fn length(&self) -> f64 {
        path_length(self.start_point, &self.commands)
    }
}

/// Generate the segment joining `e1` to `e2`.
///
/// Never fails: a negative point count yields no commands, a zero count a
/// straight line, and coincident endpoints collapse every perpendicular
/// offset to zero.
pub fn generate_segment(
    e1: &AnchorRect,
    e2: &AnchorRect,
    params: &CurveParams,
    option: &PathOption,
) -> Segment {
    let start_point = endpoint(e1, option.start.as_ref(), option.start_position(), params);
    let end_point = endpoint(e2, option.end.as_ref(), option.end_position(), params);

    let total_curves = option.curve_point_number.unwrap_or(DEFAULT_CURVE_POINTS);

    let (points, commands) = if total_curves < 0 {
        (vec![start_point, end_point], vec![])
    } else if total_curves == 0 {
        (
            vec![start_point, end_point],
            vec![PathCommand::LineTo(end_point)],
        )
    } else {
        let mut total = total_curves as usize;
        if total > MAX_CURVE_POINTS {
            log::warn!(
                "{} curve points requested, clamped to {}",
                total,
                MAX_CURVE_POINTS
            );
            total = MAX_CURVE_POINTS;
        }
        let points = curve_points(start_point, end_point, total, option, params);
        let commands = smooth_commands(&points, DEFAULT_TENSION);
        (points, commands)
    };

    log::debug!(
        "segment {:?} -> {:?}: {} points",
        start_point.to_array(),
        end_point.to_array(),
        points.len()
    );

    Segment {
        start_point,
        end_point,
        points,
        commands,
    }
}

fn endpoint(
    rect: &AnchorRect,
    path: Option<&PointPath>,
    position: AnchorPosition,
    params: &CurveParams,
) -> Point {
    let left_gap = path.and_then(|p| p.left_gap).unwrap_or(params.left_gap);
    let top_gap = path.and_then(|p| p.top_gap).unwrap_or(params.top_gap);
    Point::new(
        element_x(rect, position, params.stroke_width) + left_gap,
        element_y(rect, position, params.stroke_width) + top_gap,
    )
}

/// `[start, curve points..., end]` with curve points alternating sides of the base line
fn curve_points(
    start: Point,
    end: Point,
    total: usize,
    option: &PathOption,
    params: &CurveParams,
) -> Vec<Point> {
    let weights: Vec<f64> = (0..total)
        .map(|i| match option.control_point(i).and_then(|c| c.length) {
            Some(length) if length.is_finite() && length >= 0.0 => length,
            Some(length) => {
                log::warn!("curve point {} has invalid length {}, using 1", i, length);
                1.0
            }
            None => 1.0,
        })
        .collect();
    let total_weight = weights.iter().sum::<f64>() + 1.0;

    let delta = end - start;
    let perpendicular = Point::new(delta.y, -delta.x);
    let perpendicular_len = perpendicular.length();
    if perpendicular_len == 0.0 {
        log::warn!(
            "segment endpoints coincide at {:?}, curve offsets collapse to zero",
            start.to_array()
        );
    }

    let base_distance = params
        .default_distance
        .unwrap_or_else(|| delta.x.abs().max(delta.y.abs()) / (2.0 * total_weight));

    let mut side = params.default_opposite;
    let mut on_line = start;
    let mut points = Vec::with_capacity(total + 2);
    points.push(start);

    for (i, weight) in weights.iter().enumerate() {
        let spec = option.control_point(i);
        on_line = on_line + delta * (weight / total_weight);

        let distance = spec.and_then(|s| s.distance).unwrap_or(base_distance);
        let factor = if perpendicular_len > 0.0 {
            distance / perpendicular_len * side
        } else {
            0.0
        };
        let shift = Point::new(
            spec.and_then(|s| s.left_gap).unwrap_or(0.0),
            spec.and_then(|s| s.top_gap).unwrap_or(0.0),
        );
        points.push(on_line + perpendicular * factor + shift);

        let keep_side = spec.and_then(|s| s.opposite).unwrap_or(false);
        if !keep_side && params.enable_opposite {
            side = -side;
        }
    }

    points.push(end);
    points
}
