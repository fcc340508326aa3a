//! Road Line - scroll-driven curved lines between page anchors
//!
//! This library computes the curved segments that join consecutive anchor
//! rectangles, animates them into view as the page scrolls, and renders the
//! result to SVG.
//!
//! # Example
//!
//! ```rust
//! use road_line::render;
//!
//! let svg = render(r#"
//!     [[element]]
//!     id = "a"
//!     top = 0
//!     left = 100
//!     width = 200
//!     height = 80
//!     road_line = true
//!
//!     [[element]]
//!     id = "b"
//!     top = 500
//!     left = 500
//!     width = 200
//!     height = 80
//!     road_line = true
//! "#).unwrap();
//! assert!(svg.contains("data-road-path"));
//! ```

pub mod anchor;
pub mod animation;
pub mod config;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod orchestrator;
pub mod renderer;
pub mod stylesheet;
pub mod timer;

pub use anchor::{Anchor, AnchorDocument, AnchorDocumentError, AnchorProvider, StaticAnchors};
pub use animation::{RenderSurface, RoadLineView, ScrollAnimationController, SegmentPhase};
pub use config::{ConfigError, RoadLineConfig};
pub use curve::{generate_segment, CurveParams, PathOption, Segment};
pub use error::SourceError;
pub use geometry::{AnchorPosition, AnchorRect, Point, Viewport};
pub use renderer::{render_svg, SvgConfig, SvgSurface};
pub use stylesheet::{Stylesheet, StylesheetError};

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// The anchor document could not be loaded
    #[error("anchor document: {0}")]
    Document(#[from] AnchorDocumentError),

    /// The road-line configuration could not be loaded
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// The stylesheet could not be loaded
    #[error("stylesheet: {0}")]
    Stylesheet(#[from] StylesheetError),
}

impl RenderError {
    /// Span-aware view of the underlying parse failure, if any
    pub fn source_error(&self) -> Option<SourceError> {
        match self {
            RenderError::Document(e) => e.source_error(),
            RenderError::Config(e) => e.source_error(),
            RenderError::Stylesheet(e) => e.source_error(),
        }
    }
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Geometry and animation options
    pub road: RoadLineConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: print every segment to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the road-line configuration
    pub fn with_road(mut self, config: RoadLineConfig) -> Self {
        self.road = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Outcome of replaying a page load and a series of scrolls
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Final rendered SVG
    pub svg: String,
    /// Anchors faded in by the end, ascending
    pub revealed: Vec<usize>,
    /// Final phase of every segment
    pub phases: Vec<SegmentPhase>,
    /// Virtual time at which the last animation finished
    pub elapsed: Duration,
}

/// Render an anchor document as it looks once the initial load has settled
///
/// # Example
///
/// ```rust
/// use road_line::render;
///
/// // A single anchor has nothing to connect
/// let svg = render(r#"
///     [[element]]
///     id = "only"
///     top = 0
///     left = 0
///     width = 10
///     height = 10
///     road_line = true
/// "#).unwrap();
/// assert!(!svg.contains("data-road-path"));
/// ```
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render an anchor document with custom configuration
///
/// # Example
///
/// ```rust
/// use road_line::{render_with_config, RenderConfig, RoadLineConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_road(RoadLineConfig::default().with_stroke_width(8.0))
///     .with_svg(SvgConfig::default().with_standalone(false));
///
/// let svg = render_with_config("", config).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    Ok(simulate(source, &config, &[])?.svg)
}

/// Load the page, then scroll to each offset in turn, letting every
/// animation run to completion in virtual time after each step.
pub fn simulate(
    source: &str,
    config: &RenderConfig,
    scrolls: &[f64],
) -> Result<Simulation, RenderError> {
    let document = AnchorDocument::from_str(source)?;
    log::debug!(
        "document: {} elements, {} anchors",
        document.elements.len(),
        document.anchor_count()
    );

    let mut view = RoadLineView::new(config.road.clone());
    let mut surface = SvgSurface::new();
    view.layout(&document, &mut surface, &document.viewport, Duration::ZERO);
    let mut now = view.settle(&mut surface, Duration::ZERO);

    for &scroll_y in scrolls {
        let viewport = document.viewport.scrolled_to(scroll_y);
        log::debug!("scroll to {} at {:?}", scroll_y, now);
        view.scroll(&mut surface, &viewport, now);
        now = view.settle(&mut surface, now);
    }

    if config.debug {
        eprintln!("=== Road Debug ===");
        for (index, segment) in view.segments().iter().enumerate() {
            eprintln!(
                "[{}] {:?} length={:.1} d={}",
                index,
                view.controller().phase(index),
                segment.length(),
                segment.d()
            );
        }
        eprintln!("==================");
    }

    let svg = render_svg(&surface, &config.road, &config.svg, &config.stylesheet);
    Ok(Simulation {
        svg,
        revealed: surface.revealed_anchors(),
        phases: view.controller().phases().to_vec(),
        elapsed: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        [viewport]
        width = 1280
        height = 720

        [[element]]
        id = "intro"
        top = 100
        left = 100
        width = 300
        height = 120
        road_line = true

        [[element]]
        id = "banner"
        top = 300
        left = 0
        width = 1280
        height = 60

        [[element]]
        id = "features"
        top = 900
        left = 700
        width = 300
        height = 120
        road_line = true

        [[element]]
        id = "pricing"
        top = 1800
        left = 100
        width = 300
        height = 120
        road_line = true
    "#;

    #[test]
    fn test_render_mounts_every_segment() {
        let svg = render(PAGE).unwrap();
        assert_eq!(svg.matches("data-road-path").count(), 2);
        assert!(svg.contains(r#"id="end-road-1""#));
    }

    #[test]
    fn test_initial_load_draws_visible_segments_only() {
        let sim = simulate(PAGE, &RenderConfig::default(), &[]).unwrap();
        // Trigger line: 0 + 720 - 150 = 570, past the first anchor only
        assert_eq!(sim.phases, vec![SegmentPhase::Done, SegmentPhase::NotReady]);
        assert_eq!(sim.revealed, vec![0, 1]);
        assert_eq!(sim.elapsed, Duration::from_millis(600));
    }

    #[test]
    fn test_scrolling_to_bottom_finishes_everything() {
        let sim = simulate(PAGE, &RenderConfig::default(), &[500.0, 2000.0]).unwrap();
        assert!(sim.phases.iter().all(|p| *p == SegmentPhase::Done));
        assert_eq!(sim.revealed, vec![0, 1, 2]);
        assert!(!sim.svg.contains("display: none"));
    }

    #[test]
    fn test_invalid_document_error() {
        let err = render("[[element]]\nid = ").unwrap_err();
        assert!(matches!(err, RenderError::Document(_)));
        assert!(err.source_error().is_some());
    }

    #[test]
    fn test_render_with_stylesheet() {
        let stylesheet = Stylesheet::from_str("[colors]\nroad = \"#ff0000\"").unwrap();
        let svg =
            render_with_config(PAGE, RenderConfig::new().with_stylesheet(stylesheet)).unwrap();
        assert!(svg.contains("--road: #ff0000"));
    }
}
