//! Anchor discovery
//!
//! Anchors are the page elements a road line attaches to. Providers
//! enumerate them in document order together with a handle the rendering
//! side can use to address the element again.

pub mod document;

pub use document::{AnchorDocument, AnchorDocumentError, ElementDecl};

use crate::geometry::AnchorRect;

/// One anchor element: where it is, and how to find it again
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor<H> {
    pub handle: H,
    pub rect: AnchorRect,
}

impl<H> Anchor<H> {
    pub fn new(handle: H, rect: AnchorRect) -> Self {
        Self { handle, rect }
    }
}

/// Source of anchors in document order.
///
/// Rectangles must be read from live layout on every call; providers never
/// cache them.
pub trait AnchorProvider {
    type Handle: Clone;

    fn anchors(&self) -> Vec<Anchor<Self::Handle>>;
}

/// Fixed rectangles addressed by their index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticAnchors {
    pub rects: Vec<AnchorRect>,
}

impl StaticAnchors {
    pub fn new(rects: Vec<AnchorRect>) -> Self {
        Self { rects }
    }
}

impl AnchorProvider for StaticAnchors {
    type Handle = usize;

    fn anchors(&self) -> Vec<Anchor<usize>> {
        self.rects
            .iter()
            .enumerate()
            .map(|(i, rect)| Anchor::new(i, *rect))
            .collect()
    }
}
