//! Vector overlays drawn from a geographic center and geodesic radii.

pub mod circle;
pub mod ellipse;
pub mod geometry;
pub mod options;

use std::sync::Arc;

use crate::error::ProjError;
use crate::geo::{GeoBounds, PixelBounds};
use crate::view::{MapView, ViewTransform};

pub use circle::Circle;
pub use ellipse::{ellipse, Ellipse};
pub use geometry::{compute_geometry, EllipseGeometry};
pub use options::{EllipseArgs, EllipseOptions, PathStyle};

/// Callback asking the host to re-project and repaint a shape.
pub type RedrawHook = Arc<dyn Fn() + Send + Sync>;

/// What the renderer needs from any overlay.
pub trait Shape {
    /// Recompute pixel geometry for the current view.
    fn project(&mut self, view: &MapView) -> Result<(), ProjError>;

    /// Pixel box including the click tolerance; `None` while stale.
    fn pixel_bounds(&self) -> Option<PixelBounds>;

    /// Geographic box covered by the shape; `None` while stale.
    fn geo_bounds(&self, view: &dyn ViewTransform) -> Result<Option<GeoBounds>, ProjError>;

    /// Invalidate the geometry and notify the host.
    fn redraw(&mut self);

    fn is_stale(&self) -> bool;
}

/// Radii must be finite and non-negative.
pub(crate) fn is_valid_radius(r: f64) -> bool {
    r.is_finite() && r >= 0.0
}
