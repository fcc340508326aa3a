//! Path commands and their SVG `d` serialization

use kurbo::{BezPath, ParamCurveArclen};

use crate::geometry::Point;

/// Accuracy passed to kurbo when measuring arc length
const ARCLEN_ACCURACY: f64 = 0.01;

/// One drawing command following an implicit current point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Straight line to point
    LineTo(Point),
    /// Quadratic Bezier curve
    QuadraticTo { control: Point, end: Point },
    /// Cubic Bezier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl PathCommand {
    pub fn end(&self) -> Point {
        match self {
            PathCommand::LineTo(p) => *p,
            PathCommand::QuadraticTo { end, .. } | PathCommand::CubicTo { end, .. } => *end,
        }
    }

    /// SVG letter for this command
    pub fn letter(&self) -> char {
        match self {
            PathCommand::LineTo(_) => 'L',
            PathCommand::QuadraticTo { .. } => 'Q',
            PathCommand::CubicTo { .. } => 'C',
        }
    }

    pub fn to_svg(&self) -> String {
        match self {
            PathCommand::LineTo(p) => format!("L{} {}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::QuadraticTo { control, end } => format!(
                "Q{} {} {} {}",
                fmt_num(control.x),
                fmt_num(control.y),
                fmt_num(end.x),
                fmt_num(end.y)
            ),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => format!(
                "C{} {} {} {} {} {}",
                fmt_num(control1.x),
                fmt_num(control1.y),
                fmt_num(control2.x),
                fmt_num(control2.y),
                fmt_num(end.x),
                fmt_num(end.y)
            ),
        }
    }
}

/// Serialize a command list (without the leading move)
pub fn commands_to_svg(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(PathCommand::to_svg)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a kurbo path starting at `start`
pub fn to_bez_path(start: Point, commands: &[PathCommand]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    for cmd in commands {
        match *cmd {
            PathCommand::LineTo(p) => path.line_to(p),
            PathCommand::QuadraticTo { control, end } => path.quad_to(control, end),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => path.curve_to(control1, control2, end),
        }
    }
    path
}

/// Total drawn length of the path, the value a stroke dash array must cover
pub fn path_length(start: Point, commands: &[PathCommand]) -> f64 {
    to_bez_path(start, commands)
        .segments()
        .map(|seg| seg.arclen(ARCLEN_ACCURACY))
        .sum()
}

/// Format a coordinate with at most two decimals and no trailing zeros
pub fn fmt_num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
