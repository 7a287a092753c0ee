//! Map view state: converts between geographic positions and layer pixels.

use crate::error::ProjError;
use crate::geo::{GeoPoint, PixelPoint, Point};
use crate::proj::Crs;

/// Geographic <-> screen pixel conversion for the current view.
///
/// Implementations must not change between calls that belong to one
/// geometry computation.
pub trait ViewTransform {
    fn geo_to_pixel(&self, geo: GeoPoint) -> Result<PixelPoint, ProjError>;

    fn pixel_to_geo(&self, p: PixelPoint) -> Result<GeoPoint, ProjError>;
}

/// A zoom/pan snapshot of a map using `crs`.
///
/// Layer pixels are world pixels at `zoom` minus `pixel_origin`.
#[derive(Debug)]
pub struct MapView {
    crs: Crs,
    zoom: f64,
    pixel_origin: Point,
    round_pixels: bool,
}

impl MapView {
    pub fn new(crs: Crs, zoom: f64) -> Self {
        Self {
            crs,
            zoom,
            pixel_origin: Point::default(),
            round_pixels: false,
        }
    }

    /// Snap layer points to whole pixels.
    pub fn with_pixel_rounding(mut self, round: bool) -> Self {
        self.round_pixels = round;
        self
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    pub fn round_pixels(&self) -> bool {
        self.round_pixels
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    /// Pan so that layer pixel (0, 0) sits at `origin` in world pixels.
    pub fn set_pixel_origin(&mut self, origin: Point) {
        self.pixel_origin = origin;
    }

    /// Pan by `delta` pixels.
    pub fn pan_by(&mut self, delta: Point) {
        self.pixel_origin = self.pixel_origin + delta;
    }

    /// Put `center` at the middle of a viewport of `size` pixels.
    pub fn center_on(&mut self, center: GeoPoint, size: Point) -> Result<(), ProjError> {
        let world = self.crs.geo_to_world_pixel(center, self.zoom)?;
        self.pixel_origin = world - size / 2.0;
        Ok(())
    }
}

impl ViewTransform for MapView {
    fn geo_to_pixel(&self, geo: GeoPoint) -> Result<PixelPoint, ProjError> {
        let world = self.crs.geo_to_world_pixel(geo, self.zoom)?;
        let world = if self.round_pixels { world.round() } else { world };
        Ok(world - self.pixel_origin)
    }

    fn pixel_to_geo(&self, p: PixelPoint) -> Result<GeoPoint, ProjError> {
        self.crs.world_pixel_to_geo(p + self.pixel_origin, self.zoom)
    }
}
