//! Per-segment shape options and the style table indexed by segment

use serde::Deserialize;

use crate::geometry::AnchorPosition;

/// Where a segment starts or ends on its anchor
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PointPath {
    pub position: Option<AnchorPosition>,
    /// Replaces the global top gap for this endpoint
    pub top_gap: Option<f64>,
    /// Replaces the global left gap for this endpoint
    pub left_gap: Option<f64>,
}

impl PointPath {
    pub fn at(position: AnchorPosition) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

/// Overrides for one intermediate curve point
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ControlPointSpec {
    /// Fixed vertical shift applied after the perpendicular offset
    pub top_gap: Option<f64>,
    /// Fixed horizontal shift applied after the perpendicular offset
    pub left_gap: Option<f64>,
    /// Tension placeholder; accepted but not read
    pub t: Option<f64>,
    /// Relative spacing weight along the base line (default 1)
    pub length: Option<f64>,
    /// Absolute perpendicular offset in pixels
    pub distance: Option<f64>,
    /// Keep the previous point's side instead of flipping
    pub opposite: Option<bool>,
}

/// Shape of one segment
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathOption {
    pub start: Option<PointPath>,
    pub end: Option<PointPath>,
    #[serde(default)]
    pub c_points: Vec<ControlPointSpec>,
    /// Number of intermediate points; 0 draws a straight line, negative draws nothing
    pub curve_point_number: Option<i32>,
}

impl PathOption {
    /// Option attaching `start` on the first anchor to `end` on the second
    pub fn between(start: AnchorPosition, end: AnchorPosition) -> Self {
        Self {
            start: Some(PointPath::at(start)),
            end: Some(PointPath::at(end)),
            ..Self::default()
        }
    }

    /// bottomCenter → topCenter, no offsets
    pub fn neutral() -> Self {
        Self::between(AnchorPosition::BottomCenter, AnchorPosition::TopCenter)
    }

    pub fn with_curve_points(mut self, count: i32) -> Self {
        self.curve_point_number = Some(count);
        self
    }

    pub fn with_control_points(mut self, specs: Vec<ControlPointSpec>) -> Self {
        self.c_points = specs;
        self
    }

    pub fn start_position(&self) -> AnchorPosition {
        self.start
            .as_ref()
            .and_then(|s| s.position)
            .unwrap_or(AnchorPosition::BottomCenter)
    }

    pub fn end_position(&self) -> AnchorPosition {
        self.end
            .as_ref()
            .and_then(|e| e.position)
            .unwrap_or(AnchorPosition::TopCenter)
    }

    pub fn control_point(&self, index: usize) -> Option<&ControlPointSpec> {
        self.c_points.get(index)
    }
}

/// Path options indexed by segment, with an explicit fallback
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    styles: Vec<PathOption>,
    fallback: PathOption,
}

impl StyleTable {
    /// Table with the neutral fallback
    pub fn new(styles: Vec<PathOption>) -> Self {
        Self {
            styles,
            fallback: PathOption::neutral(),
        }
    }

    /// The stock table: the first road leaves diagonally, the next two run straight down
    pub fn builtin() -> Self {
        Self::new(vec![
            PathOption::between(AnchorPosition::BottomLeft, AnchorPosition::TopRight),
            PathOption::neutral(),
            PathOption::neutral(),
        ])
    }

    pub fn with_fallback(mut self, fallback: PathOption) -> Self {
        self.fallback = fallback;
        self
    }

    /// Option for segment `index`.
    ///
    /// Indices past the end of the table get the fallback option, which is
    /// bottomCenter → topCenter unless replaced with [`StyleTable::with_fallback`].
    pub fn style_for(&self, index: usize) -> &PathOption {
        self.styles.get(index).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_for_falls_back_past_table() {
        let table = StyleTable::builtin();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.style_for(0).start_position(),
            AnchorPosition::BottomLeft
        );
        assert_eq!(table.style_for(0).end_position(), AnchorPosition::TopRight);
        assert_eq!(table.style_for(7), &PathOption::neutral());
    }

    #[test]
    fn test_custom_fallback() {
        let fallback = PathOption::between(AnchorPosition::RightCenter, AnchorPosition::LeftCenter);
        let table = StyleTable::new(vec![]).with_fallback(fallback.clone());
        assert!(table.is_empty());
        assert_eq!(table.style_for(0), &fallback);
    }

    #[test]
    fn test_default_positions() {
        let option = PathOption::default();
        assert_eq!(option.start_position(), AnchorPosition::BottomCenter);
        assert_eq!(option.end_position(), AnchorPosition::TopCenter);
        assert!(option.control_point(0).is_none());
    }

    #[test]
    fn test_deserialize_option_from_toml() {
        let option: PathOption = toml::from_str(
            r#"
curve_point_number = 2
start = { position = "leftCenter", top_gap = 4 }
end = { position = "sideways" }

[[c_points]]
distance = 30
opposite = true
"#,
        )
        .expect("Should parse");
        assert_eq!(option.curve_point_number, Some(2));
        assert_eq!(option.start_position(), AnchorPosition::LeftCenter);
        assert_eq!(option.start.as_ref().and_then(|s| s.top_gap), Some(4.0));
        assert_eq!(option.end_position(), AnchorPosition::Unknown);
        assert_eq!(option.c_points[0].distance, Some(30.0));
        assert_eq!(option.c_points[0].opposite, Some(true));
    }
}
