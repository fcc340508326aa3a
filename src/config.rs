//! Road-line configuration
//!
//! Every knob has a default, so an empty TOML file is a valid configuration:
//!
//! ```toml
//! stroke_width = 4
//! animation_gap = 150
//! animation_time_ms = 600
//! default_distance = 100
//!
//! [[style]]
//! start = { position = "bottomLeft" }
//! end = { position = "topRight" }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::curve::{CurveParams, PathOption, StyleTable};
use crate::error::SourceError;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl ConfigError {
    /// Span-aware view of the error, when one is available
    pub fn source_error(&self) -> Option<SourceError> {
        match self {
            ConfigError::ParseError(e) => Some(SourceError::from_toml(e)),
            ConfigError::IoError(_) => None,
        }
    }
}

/// Options for laying out and animating a road line
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLineConfig {
    /// Stroke width of every road, also drives the perimeter offset
    pub stroke_width: f64,

    /// Width of the drawing surface
    pub width: f64,

    /// Height of the drawing surface
    pub height: f64,

    /// Distance above the viewport bottom at which a segment starts drawing
    pub animation_gap: f64,

    /// Duration of one draw-in animation
    pub animation_time: Duration,

    /// Perpendicular offset of curve points; computed from the span when None
    pub default_distance: Option<f64>,

    /// Global vertical gap added to every endpoint
    pub top_gap: f64,

    /// Global horizontal gap added to every endpoint
    pub left_gap: f64,

    /// Shapes indexed by segment
    pub styles: StyleTable,
}

impl Default for RoadLineConfig {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            width: 1200.0,
            height: 800.0,
            animation_gap: 150.0,
            animation_time: Duration::from_millis(600),
            default_distance: Some(100.0),
            top_gap: 0.0,
            left_gap: 0.0,
            styles: StyleTable::builtin(),
        }
    }
}

#[derive(Deserialize)]
struct TomlConfig {
    stroke_width: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    animation_gap: Option<f64>,
    animation_time_ms: Option<u64>,
    default_distance: Option<f64>,
    /// Drop the fixed distance and derive it from each segment's span
    #[serde(default)]
    auto_distance: bool,
    top_gap: Option<f64>,
    left_gap: Option<f64>,
    style: Option<Vec<PathOption>>,
    fallback_style: Option<PathOption>,
}

impl RoadLineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let mut styles = match parsed.style {
            Some(styles) => StyleTable::new(styles),
            None => defaults.styles,
        };
        if let Some(fallback) = parsed.fallback_style {
            styles = styles.with_fallback(fallback);
        }

        let default_distance = if parsed.auto_distance {
            None
        } else {
            parsed.default_distance.or(defaults.default_distance)
        };

        Ok(RoadLineConfig {
            stroke_width: parsed.stroke_width.unwrap_or(defaults.stroke_width),
            width: parsed.width.unwrap_or(defaults.width),
            height: parsed.height.unwrap_or(defaults.height),
            animation_gap: parsed.animation_gap.unwrap_or(defaults.animation_gap),
            animation_time: parsed
                .animation_time_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.animation_time),
            default_distance,
            top_gap: parsed.top_gap.unwrap_or(defaults.top_gap),
            left_gap: parsed.left_gap.unwrap_or(defaults.left_gap),
            styles,
        })
    }

    /// Set the stroke width
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Set the drawing surface size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the trigger gap above the viewport bottom
    pub fn with_animation_gap(mut self, gap: f64) -> Self {
        self.animation_gap = gap;
        self
    }

    /// Set the draw-in duration
    pub fn with_animation_time(mut self, time: Duration) -> Self {
        self.animation_time = time;
        self
    }

    /// Set or clear the fixed perpendicular distance
    pub fn with_default_distance(mut self, distance: Option<f64>) -> Self {
        self.default_distance = distance;
        self
    }

    /// Set the global endpoint gaps
    pub fn with_gaps(mut self, top_gap: f64, left_gap: f64) -> Self {
        self.top_gap = top_gap;
        self.left_gap = left_gap;
        self
    }

    /// Replace the style table
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    /// Curve generator inputs derived from this configuration
    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            top_gap: self.top_gap,
            left_gap: self.left_gap,
            stroke_width: self.stroke_width,
            default_distance: self.default_distance,
            ..CurveParams::default()
        }
    }
}
