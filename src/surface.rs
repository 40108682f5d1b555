//! Drawing surface seam.
//!
//! The engine never queries global display state. The host describes the
//! surface once (CSS size, device pixel ratio, viewport orientation) and the
//! engine hands finished [`Scene`]s back through [`Surface::present`].

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::error::SliderError;
use crate::render::Scene;

/// A point in CSS pixels, relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Viewport orientation. Landscape viewports get shorter, thinner ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape when strictly wider than tall.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        if width > height { Self::Landscape } else { Self::Portrait }
    }

    /// Orientation of the viewport, or of the surface itself when the
    /// viewport size is unknown.
    #[must_use]
    pub fn from_viewport(viewport: Option<(f64, f64)>, width: f64, height: f64) -> Self {
        let (width, height) = viewport.unwrap_or((width, height));
        Self::from_size(width, height)
    }
}

/// Size and density of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDescriptor {
    /// Layout width in CSS pixels.
    pub css_width: f64,
    /// Layout height in CSS pixels.
    pub css_height: f64,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
    pub orientation: Orientation,
}

impl SurfaceDescriptor {
    /// Describe a surface. Non-positive or non-finite pixel ratios fall back to `1`.
    #[must_use]
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64, orientation: Orientation) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self { css_width, css_height, pixel_ratio, orientation }
    }

    /// Backing-store width in device pixels.
    #[must_use]
    pub fn backing_width(&self) -> f64 {
        (self.css_width * self.pixel_ratio).round()
    }

    /// Backing-store height in device pixels.
    #[must_use]
    pub fn backing_height(&self) -> f64 {
        (self.css_height * self.pixel_ratio).round()
    }

    /// Ring center in CSS pixels, derived from the backing size.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.backing_width() / (2.0 * self.pixel_ratio),
            self.backing_height() / (2.0 * self.pixel_ratio),
        )
    }
}

/// Something the engine can draw on.
pub trait Surface {
    /// Current size and density.
    fn descriptor(&self) -> SurfaceDescriptor;

    /// Replace the surface contents with `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::Render`] when the backend rejects a draw call.
    fn present(&mut self, scene: &Scene) -> Result<(), SliderError>;
}
