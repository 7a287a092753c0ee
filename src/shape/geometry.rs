//! Geographic center + planar radii -> screen-space ellipse.
//!
//! The radii are offsets in the CRS's planar unit. Each axis is offset in
//! planar space, unprojected, and then sent through the same pixel path as the
//! center, so the result stays consistent under non-linear view transforms.
//! This is a screen-space approximation: near the poles it drifts from a true
//! ellipse and nothing corrects for that.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::geo::{GeoPoint, PixelBounds, PixelPoint, PlanarPoint, Point};
use crate::proj::Projection;
use crate::view::ViewTransform;

/// Pixel-space ellipse for one projection pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipseGeometry {
    pub center: GeoPoint,
    pub planar_center: PlanarPoint,
    pub pixel_center: PixelPoint,
    /// Horizontal radius in pixels.
    pub radius_x: f64,
    /// Vertical radius in pixels.
    pub radius_y: f64,
    pub bounds: PixelBounds,
}

impl EllipseGeometry {
    pub fn new(
        center: GeoPoint,
        planar_center: PlanarPoint,
        pixel_center: PixelPoint,
        radius_x: f64,
        radius_y: f64,
    ) -> Self {
        Self {
            center,
            planar_center,
            pixel_center,
            radius_x,
            radius_y,
            bounds: PixelBounds::around(pixel_center, Point::new(radius_x, radius_y)),
        }
    }

    /// `pixel_center ± (radius_x, radius_y)`.
    pub fn bounds(&self) -> PixelBounds {
        self.bounds
    }

    pub fn is_circle(&self, tolerance: f64) -> bool {
        (self.radius_x - self.radius_y).abs() <= tolerance
    }
}

/// Project an ellipse onto the screen.
///
/// `radius_x` and `radius_y` must already be validated. Errors from `crs` or
/// `view` are returned unchanged.
pub fn compute_geometry(
    center: GeoPoint,
    radius_x: f64,
    radius_y: f64,
    crs: &dyn Projection,
    view: &dyn ViewTransform,
) -> Result<EllipseGeometry, ProjError> {
    let planar_center = crs.project(center)?;
    let west = planar_center - Point::new(radius_x, 0.0);
    let north = planar_center + Point::new(0.0, radius_y);

    let geo_west = crs.unproject(west)?;
    let geo_north = crs.unproject(north)?;

    let pixel_center = view.geo_to_pixel(center)?;
    let pixel_west = view.geo_to_pixel(geo_west)?;
    let pixel_north = view.geo_to_pixel(geo_north)?;

    // Pixel y grows downwards, so north of the center has a smaller y.
    let raw_x = pixel_center.x - pixel_west.x;
    let raw_y = pixel_center.y - pixel_north.y;
    if raw_x < 0.0 || raw_y < 0.0 {
        debug!("Ellipse at {center:?}: flipped screen axis (raw radii {raw_x}, {raw_y})");
    }

    let geometry = EllipseGeometry::new(
        center,
        planar_center,
        pixel_center,
        raw_x.abs(),
        raw_y.abs(),
    );
    trace!(
        "Projected ellipse: center {:?} px, radii ({}, {}) px",
        geometry.pixel_center,
        geometry.radius_x,
        geometry.radius_y
    );
    Ok(geometry)
}
