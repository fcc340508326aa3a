//! Page descriptions loaded from TOML
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 720
//! scroll_y = 0
//!
//! [[element]]
//! id = "hero"
//! top = 40
//! left = 100
//! width = 400
//! height = 200
//! road_line = true
//! ```
//!
//! Element boxes are viewport-relative, as a layout engine would report them
//! at the recorded scroll offset. Only elements with `road_line = true` are
//! anchors.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::SourceError;
use crate::geometry::{get_offset, ClientRect, Viewport};

use super::{Anchor, AnchorProvider};

/// Errors that can occur when loading an anchor document
#[derive(Error, Debug)]
pub enum AnchorDocumentError {
    #[error("Failed to read anchor document: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse anchor document TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}

impl AnchorDocumentError {
    /// Span-aware view of the error, when one is available
    pub fn source_error(&self) -> Option<SourceError> {
        match self {
            AnchorDocumentError::ParseError(e) => Some(SourceError::from_toml(e)),
            _ => None,
        }
    }
}

/// One element on the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementDecl {
    pub id: String,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Marks the element as a road-line anchor
    #[serde(default)]
    pub road_line: bool,
}

impl ElementDecl {
    fn client_rect(&self) -> ClientRect {
        ClientRect {
            width: self.width,
            height: self.height,
            top: self.top,
            left: self.left,
        }
    }
}

#[derive(Deserialize)]
struct TomlViewport {
    width: f64,
    height: f64,
    #[serde(default)]
    scroll_x: f64,
    #[serde(default)]
    scroll_y: f64,
}

#[derive(Deserialize)]
struct TomlDocument {
    viewport: Option<TomlViewport>,
    #[serde(default)]
    element: Vec<ElementDecl>,
}

/// A static page: a viewport and its elements in document order
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorDocument {
    pub viewport: Viewport,
    pub elements: Vec<ElementDecl>,
}

impl AnchorDocument {
    /// Load a document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, AnchorDocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, AnchorDocumentError> {
        let parsed: TomlDocument = toml::from_str(content)?;

        let viewport = match parsed.viewport {
            Some(v) => {
                if v.width <= 0.0 || v.height <= 0.0 {
                    return Err(AnchorDocumentError::InvalidViewport {
                        reason: format!("size must be positive, got {}x{}", v.width, v.height),
                    });
                }
                Viewport {
                    scroll_x: v.scroll_x,
                    scroll_y: v.scroll_y,
                    width: v.width,
                    height: v.height,
                }
            }
            None => Viewport::default(),
        };

        Ok(AnchorDocument {
            viewport,
            elements: parsed.element,
        })
    }

    /// Number of elements carrying the anchor marker
    pub fn anchor_count(&self) -> usize {
        self.elements.iter().filter(|e| e.road_line).count()
    }
}

impl AnchorProvider for AnchorDocument {
    type Handle = String;

    fn anchors(&self) -> Vec<Anchor<String>> {
        self.elements
            .iter()
            .filter(|e| e.road_line)
            .map(|e| Anchor::new(e.id.clone(), get_offset(&e.client_rect(), &self.viewport)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AnchorRect;

    const PAGE: &str = r#"
[viewport]
width = 800
height = 600
scroll_y = 100

[[element]]
id = "hero"
top = -60
left = 0
width = 100
height = 50
road_line = true

[[element]]
id = "decoration"
top = 0
left = 0
width = 10
height = 10

[[element]]
id = "features"
top = 500
left = 0
width = 100
height = 50
road_line = true
"#;

    #[test]
    fn test_only_marked_elements_are_anchors() {
        let doc = AnchorDocument::from_str(PAGE).expect("Should parse");
        assert_eq!(doc.elements.len(), 3);
        assert_eq!(doc.anchor_count(), 2);
        let anchors = doc.anchors();
        let ids: Vec<_> = anchors.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(ids, vec!["hero", "features"]);
    }

    #[test]
    fn test_anchor_rects_are_page_relative() {
        let doc = AnchorDocument::from_str(PAGE).expect("Should parse");
        let anchors = doc.anchors();
        assert_eq!(anchors[0].rect, AnchorRect::new(0.0, 40.0, 100.0, 50.0));
        assert_eq!(anchors[1].rect, AnchorRect::new(0.0, 600.0, 100.0, 50.0));
    }

    #[test]
    fn test_missing_viewport_uses_default() {
        let doc = AnchorDocument::from_str("").expect("Should parse");
        assert_eq!(doc.viewport, Viewport::default());
        assert!(doc.anchors().is_empty());
    }

    #[test]
    fn test_invalid_viewport() {
        let err = AnchorDocument::from_str("[viewport]\nwidth = 0\nheight = 10\n").unwrap_err();
        assert!(matches!(err, AnchorDocumentError::InvalidViewport { .. }));
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = AnchorDocument::from_str("[[element]]\nid = ").unwrap_err();
        let source = err.source_error().expect("parse errors carry a span");
        assert!(source.span.is_some());
    }
}
