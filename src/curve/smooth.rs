//! Smooth paths through a point list using local tangents
//!
//! Each interior point gets two control points along the direction from its
//! previous to its next neighbor, so the path passes through every point and
//! stays tangent-continuous. The end spans are quadratic, the inner spans
//! cubic.

use crate::geometry::Point;

use super::path::PathCommand;

/// Fraction of the neighbor difference used for the control arms
pub const DEFAULT_TENSION: f64 = 0.2;

/// Control point pairs for every interior point of `points`.
///
/// Entry `k` belongs to `points[k + 1]` and holds `(forward, backward)`:
/// the arm toward the next point and the arm toward the previous one.
pub fn control_points(points: &[Point], tension: f64) -> Vec<(Point, Point)> {
    points
        .windows(3)
        .map(|w| {
            let tangent = (w[2] - w[0]) * tension;
            (w[1] + tangent, w[1] - tangent)
        })
        .collect()
}

/// Commands drawing a smooth path from `points[0]` through the rest.
///
/// Two points give a straight line; fewer give nothing.
pub fn smooth_commands(points: &[Point], tension: f64) -> Vec<PathCommand> {
    match points.len() {
        0 | 1 => return vec![],
        2 => return vec![PathCommand::LineTo(points[1])],
        _ => {}
    }

    let pc = control_points(points, tension);
    let last = points.len() - 1;
    let mut commands = Vec::with_capacity(last);

    commands.push(PathCommand::QuadraticTo {
        control: pc[0].1,
        end: points[1],
    });
    for i in 1..last - 1 {
        commands.push(PathCommand::CubicTo {
            control1: pc[i - 1].0,
            control2: pc[i].1,
            end: points[i + 1],
        });
    }
    commands.push(PathCommand::QuadraticTo {
        control: pc[last - 2].0,
        end: points[last],
    });

    commands
}
