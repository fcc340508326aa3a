//! SVG generation from mounted segments

use crate::config::RoadLineConfig;
use crate::curve::{fmt_num, Segment};
use crate::stylesheet::Stylesheet;

use super::surface::{SegmentPaint, SvgSurface};
use super::SvgConfig;

/// Id prefix of the marker drawn at the end of each segment
pub const END_ROAD_MARKER: &str = "end-road";

/// Element id of segment `index`'s end marker
pub fn end_marker_id(index: usize) -> String {
    format!("{}-{}", END_ROAD_MARKER, index)
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add CSS custom properties and class rules from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let prefix = self.prefix();
        let vars: Vec<String> = stylesheet
            .colors
            .iter()
            .map(|(token, value)| format!("--{}: {};", token, value))
            .collect();
        self.styles.push(format!(":root {{ {} }}", vars.join(" ")));
        self.styles.push(format!(
            ".{}path {{ stroke: var(--road, {}); }}",
            prefix,
            stylesheet.resolve_or_default("road")
        ));
        self.styles.push(format!(
            ".{}start {{ fill: var(--start-marker, {}); }}",
            prefix,
            stylesheet.resolve_or_default("start-marker")
        ));
        self.styles.push(format!(
            ".{}end {{ fill: var(--end-marker, {}); }}",
            prefix,
            stylesheet.resolve_or_default("end-marker")
        ));
    }

    /// Add one segment: its path, a start marker, and a hidden-until-drawn end marker
    pub fn add_segment(
        &mut self,
        index: usize,
        segment: &Segment,
        paint: Option<&SegmentPaint>,
        stroke_width: f64,
    ) {
        let prefix = self.prefix();
        let indent = self.indent_str();
        let inner = if self.config.pretty_print {
            "  ".repeat(self.indent + 1)
        } else {
            String::new()
        };
        let nl = self.newline();
        let radius = fmt_num(stroke_width * self.config.marker_ratio);

        let dash = paint
            .map(|p| {
                format!(
                    r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
                    fmt_num(p.dash_array),
                    fmt_num(p.dash_offset)
                )
            })
            .unwrap_or_default();
        let end_hidden = if paint.is_some_and(|p| p.end_marker_visible) {
            String::new()
        } else {
            r#" style="display: none""#.to_string()
        };

        let mut group = format!(
            r#"{}<g class="{}segment" data-index="{}">{}"#,
            indent, prefix, index, nl
        );
        group.push_str(&format!(
            r#"{}<path class="{}path" data-road-path="true" d="{}" stroke-width="{}" stroke-linecap="round" fill="none"{}/>{}"#,
            inner,
            prefix,
            segment.d(),
            fmt_num(stroke_width),
            dash,
            nl
        ));
        group.push_str(&format!(
            r#"{}<ellipse class="{}start" cx="{}" cy="{}" rx="{}" ry="{}"/>{}"#,
            inner,
            prefix,
            fmt_num(segment.start_point.x),
            fmt_num(segment.start_point.y),
            radius,
            radius,
            nl
        ));
        group.push_str(&format!(
            r#"{}<ellipse id="{}" class="{}end" cx="{}" cy="{}" rx="{}" ry="{}"{}/>{}"#,
            inner,
            end_marker_id(index),
            prefix,
            fmt_num(segment.end_point.x),
            fmt_num(segment.end_point.y),
            radius,
            radius,
            end_hidden,
            nl
        ));
        group.push_str(&format!("{}</g>", indent));
        self.elements.push(group);
    }

    /// Assemble the final document
    pub fn build(self, width: f64, height: f64, visible: bool) -> String {
        let nl = self.newline();
        let prefix = self.prefix();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="bezierRoadLine" class="{}container" width="{}" height="{}" viewBox="0 0 {} {}" style="overflow: clip; opacity: {}">"#,
            prefix,
            fmt_num(width),
            fmt_num(height),
            fmt_num(width),
            fmt_num(height),
            if visible { 1 } else { 0 }
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            let indent = self.indent_str();
            let inner = if self.config.pretty_print { "  " } else { "" };
            svg.push_str(&format!("{}<style>{}", indent, nl));
            for style in &self.styles {
                svg.push_str(&format!("{}{}{}{}", indent, inner, style, nl));
            }
            svg.push_str(&format!("{}</style>{}", indent, nl));
        }

        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render everything mounted on `surface` with its current paint state
pub fn render_svg(
    surface: &SvgSurface,
    road: &RoadLineConfig,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);
    for (index, segment) in surface.segments().iter().enumerate() {
        builder.add_segment(index, segment, surface.paint(index), road.stroke_width);
    }
    builder.build(road.width, road.height, surface.is_container_visible())
}
