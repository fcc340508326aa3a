//! Scroll-driven draw-in animation
//!
//! The controller decides which segments must be drawn at a given scroll
//! offset and drives their stroke-offset countdowns. It talks to the page
//! only through a [`RenderSurface`], so it runs the same against a real
//! renderer and the headless SVG surface.

pub mod controller;
pub mod surface;
pub mod view;

pub use controller::{ScrollAnimationController, SegmentPhase};
pub use surface::RenderSurface;
pub use view::RoadLineView;
