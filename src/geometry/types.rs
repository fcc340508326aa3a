//! Core geometric types

use std::ops::{Add, Mul, Sub};

/// A 2D point in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Dot product with another vector
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// `[x, y]` pair, the shape endpoints are exchanged in
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

/// Page-relative (scroll-adjusted) bounding box of one anchor element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

impl AnchorRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Viewport-relative box as a layout engine reports it (before scroll adjustment)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
}

/// The visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Same viewport scrolled vertically to `scroll_y`
    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Convert a viewport-relative box into page coordinates.
///
/// Must be called against the live viewport every time; a result taken at a
/// different scroll offset is stale.
pub fn get_offset(client: &ClientRect, viewport: &Viewport) -> AnchorRect {
    AnchorRect {
        width: client.width,
        height: client.height,
        left: client.left + viewport.scroll_x,
        top: client.top + viewport.scroll_y,
    }
}
