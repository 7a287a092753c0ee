//! Ellipse overlay: a circle with independent horizontal and vertical radii.
//!
//! The approximation is made in screen space and starts to diverge from a
//! real ellipse towards the poles because of projection distortion.

use std::fmt;

use log::debug;

use crate::error::{EllipseError, ProjError};
use crate::geo::{GeoBounds, GeoPoint, PixelBounds};
use crate::shape::circle::{geo_bounds_of, padded_bounds, Circle};
use crate::shape::geometry::{compute_geometry, EllipseGeometry};
use crate::shape::options::{EllipseArgs, EllipseOptions, PathStyle};
use crate::shape::{is_valid_radius, RedrawHook, Shape};
use crate::view::{MapView, ViewTransform};

pub struct Ellipse {
    circle: Circle,
    radius_y: f64,
}

impl Ellipse {
    /// Build an ellipse from normalised options.
    ///
    /// `radius` is checked before `radius_y`; an unset `radius_y` counts as NaN.
    pub fn new(center: GeoPoint, options: EllipseOptions) -> Result<Self, EllipseError> {
        let EllipseOptions {
            radius,
            radius_y,
            style,
        } = options;

        if !is_valid_radius(radius) {
            return Err(EllipseError::InvalidRadius(radius));
        }
        let radius_y = radius_y.unwrap_or(f64::NAN);
        if !is_valid_radius(radius_y) {
            return Err(EllipseError::InvalidRadiusY(radius_y));
        }

        Ok(Self {
            circle: Circle::new(center, radius, style)?,
            radius_y,
        })
    }

    pub fn with_redraw_hook(mut self, hook: RedrawHook) -> Self {
        self.circle.set_redraw_hook(Some(hook));
        self
    }

    pub fn set_redraw_hook(&mut self, hook: Option<RedrawHook>) {
        self.circle.set_redraw_hook(hook);
    }

    pub fn center(&self) -> GeoPoint {
        self.circle.center()
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.circle.set_center(center);
    }

    /// East-west radius in planar units.
    pub fn radius(&self) -> f64 {
        self.circle.radius()
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), EllipseError> {
        self.circle.set_radius(radius)
    }

    /// North-south radius in planar units.
    pub fn radius_y(&self) -> f64 {
        self.radius_y
    }

    /// Change the north-south radius. Geometry is recomputed on the next
    /// projection pass, not here.
    pub fn set_radius_y(&mut self, radius_y: f64) -> Result<(), EllipseError> {
        if !is_valid_radius(radius_y) {
            return Err(EllipseError::InvalidRadiusY(radius_y));
        }
        self.radius_y = radius_y;
        self.redraw();
        Ok(())
    }

    pub fn style(&self) -> &PathStyle {
        self.circle.style()
    }

    pub fn set_style(&mut self, style: PathStyle) {
        self.circle.set_style(style);
    }

    /// Geometry from the last projection pass, `None` while stale.
    pub fn geometry(&self) -> Option<&EllipseGeometry> {
        self.circle.geometry()
    }

    /// Current options, suitable for serialising.
    pub fn options(&self) -> EllipseOptions {
        EllipseOptions {
            radius: self.radius(),
            radius_y: Some(self.radius_y),
            style: self.style().clone(),
        }
    }
}

/// Factory accepting either `EllipseOptions` or the legacy
/// `radius` / `(radius, options)` shapes.
pub fn ellipse(center: GeoPoint, args: impl Into<EllipseArgs>) -> Result<Ellipse, EllipseError> {
    Ellipse::new(center, args.into().normalize())
}

impl Shape for Ellipse {
    fn project(&mut self, view: &MapView) -> Result<(), ProjError> {
        self.circle.clear_geometry();
        let geometry = compute_geometry(
            self.circle.center(),
            self.circle.radius(),
            self.radius_y,
            view.crs(),
            view,
        )?;
        debug!(
            "Ellipse at {:?} projected at zoom {}: ({:.3}, {:.3}) px",
            geometry.center,
            view.zoom(),
            geometry.radius_x,
            geometry.radius_y
        );
        self.circle.store_geometry(geometry);
        Ok(())
    }

    fn pixel_bounds(&self) -> Option<PixelBounds> {
        self.geometry().map(|g| padded_bounds(g, self.style()))
    }

    fn geo_bounds(&self, view: &dyn ViewTransform) -> Result<Option<GeoBounds>, ProjError> {
        self.geometry().map(|g| geo_bounds_of(g, view)).transpose()
    }

    fn redraw(&mut self) {
        self.circle.redraw();
    }

    fn is_stale(&self) -> bool {
        self.circle.is_stale()
    }
}

impl fmt::Debug for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ellipse")
            .field("circle", &self.circle)
            .field("radius_y", &self.radius_y)
            .finish()
    }
}
