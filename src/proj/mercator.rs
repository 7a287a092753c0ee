//! Spherical (Web) Mercator, EPSG:3857.
//!
//!   forward: x = R·λ, y = R·ln(tan(π/4 + φ/2))
//!   inverse: λ = x/R, φ = 2·atan(exp(y/R)) - π/2

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;
use crate::geo::{GeoPoint, PlanarPoint};
use crate::proj::ellipsoid::{Ellipsoid, WGS84};
use crate::proj::Projection;

/// Latitude (degrees) at which the projected world becomes a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

#[derive(Clone, Copy, Debug)]
pub struct SphericalMercator {
    ellipsoid: Ellipsoid,
}

impl SphericalMercator {
    pub fn new() -> Self {
        Self { ellipsoid: WGS84 }
    }

    /// Sphere radius in metres.
    pub fn radius(&self) -> f64 {
        self.ellipsoid.a
    }
}

impl Default for SphericalMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for SphericalMercator {
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError> {
        let r = self.radius();
        let lat = geo.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = r * geo.lng.to_radians();
        let y = r * (FRAC_PI_4 + lat / 2.0).tan().ln();
        Ok(PlanarPoint::new(x, y))
    }

    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError> {
        let r = self.radius();
        let lng = p.x / r;
        let lat = 2.0 * (p.y / r).exp().atan() - FRAC_PI_2;
        Ok(GeoPoint {
            lat: lat.to_degrees(),
            lng: lng.to_degrees(),
        })
    }
}
