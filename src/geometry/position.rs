//! Named attachment positions on an anchor rectangle

use std::fmt;

use serde::Deserialize;

use super::types::AnchorRect;

/// Ratio between stroke width and the outward gap kept around an anchor
pub const PERIMETER_RATIO: f64 = 1.25;

/// Where on a rectangle a curve attaches.
///
/// Names follow the camelCase spelling used in configuration files
/// (`topLeft`, `bottomCenter`, ...). Anything else deserializes to
/// [`AnchorPosition::Unknown`], whose coordinates are always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum AnchorPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    LeftCenter,
    RightCenter,
    Unknown,
}

impl AnchorPosition {
    pub const ALL: [AnchorPosition; 8] = [
        AnchorPosition::TopLeft,
        AnchorPosition::TopCenter,
        AnchorPosition::TopRight,
        AnchorPosition::BottomLeft,
        AnchorPosition::BottomCenter,
        AnchorPosition::BottomRight,
        AnchorPosition::LeftCenter,
        AnchorPosition::RightCenter,
    ];

    /// Look up a position by its camelCase name
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| {
                log::warn!("unknown anchor position '{}', coordinates fall back to 0", name);
                AnchorPosition::Unknown
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnchorPosition::TopLeft => "topLeft",
            AnchorPosition::TopCenter => "topCenter",
            AnchorPosition::TopRight => "topRight",
            AnchorPosition::BottomLeft => "bottomLeft",
            AnchorPosition::BottomCenter => "bottomCenter",
            AnchorPosition::BottomRight => "bottomRight",
            AnchorPosition::LeftCenter => "leftCenter",
            AnchorPosition::RightCenter => "rightCenter",
            AnchorPosition::Unknown => "unknown",
        }
    }

    /// True for the four edge-center variants
    pub fn is_center(&self) -> bool {
        self.name().contains("Center")
    }
}

impl From<String> for AnchorPosition {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for AnchorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// X coordinate of `position` on `rect`, pushed outward by the default perimeter
pub fn element_x(rect: &AnchorRect, position: AnchorPosition, stroke_width: f64) -> f64 {
    element_x_with(
        rect,
        position,
        stroke_width * PERIMETER_RATIO,
        position.is_center(),
    )
}

/// Y coordinate of `position` on `rect`, pushed outward by the default perimeter
pub fn element_y(rect: &AnchorRect, position: AnchorPosition, stroke_width: f64) -> f64 {
    element_y_with(
        rect,
        position,
        stroke_width * PERIMETER_RATIO,
        position.is_center(),
    )
}

/// X coordinate with an explicit perimeter and center flag.
///
/// Top/bottom centers sit on the horizontal midpoint (or the left edge when
/// `is_center` is false) without any perimeter push.
pub fn element_x_with(
    rect: &AnchorRect,
    position: AnchorPosition,
    perimeter: f64,
    is_center: bool,
) -> f64 {
    match position {
        AnchorPosition::TopCenter | AnchorPosition::BottomCenter => {
            rect.left + if is_center { rect.width / 2.0 } else { 0.0 }
        }
        AnchorPosition::TopLeft | AnchorPosition::BottomLeft | AnchorPosition::LeftCenter => {
            rect.left - perimeter
        }
        AnchorPosition::TopRight | AnchorPosition::BottomRight | AnchorPosition::RightCenter => {
            rect.right() + perimeter
        }
        AnchorPosition::Unknown => 0.0,
    }
}

/// Y coordinate with an explicit perimeter and center flag.
///
/// Left/right centers sit on the vertical midpoint (or the top edge when
/// `is_center` is false) without any perimeter push.
pub fn element_y_with(
    rect: &AnchorRect,
    position: AnchorPosition,
    perimeter: f64,
    is_center: bool,
) -> f64 {
    match position {
        AnchorPosition::LeftCenter | AnchorPosition::RightCenter => {
            rect.top + if is_center { rect.height / 2.0 } else { 0.0 }
        }
        AnchorPosition::TopLeft | AnchorPosition::TopCenter | AnchorPosition::TopRight => {
            rect.top - perimeter
        }
        AnchorPosition::BottomLeft | AnchorPosition::BottomCenter | AnchorPosition::BottomRight => {
            rect.bottom() + perimeter
        }
        AnchorPosition::Unknown => 0.0,
    }
}
