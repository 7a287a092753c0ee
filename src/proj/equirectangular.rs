//! Equirectangular projections.
//!
//! `LonLat`: x = λ, y = φ (degrees, no scaling)
//! `Equirectangular`: x = a·(λ - λ₀)·cos(φ₁), y = a·(φ - φ₀) (metres)

use crate::error::ProjError;
use crate::geo::{GeoPoint, PlanarPoint};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::Projection;

/// Identity projection: longitude and latitude are used as planar x and y.
#[derive(Clone, Copy, Debug, Default)]
pub struct LonLat;

impl Projection for LonLat {
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError> {
        Ok(PlanarPoint::new(geo.lng, geo.lat))
    }

    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError> {
        Ok(GeoPoint { lat: p.y, lng: p.x })
    }
}

/// Plate Carrée in metres with a standard parallel.
#[derive(Clone, Copy, Debug)]
pub struct Equirectangular {
    ellipsoid: Ellipsoid,
    lon0: f64,
    lat0: f64,
    cos_lat_ts: f64,
}

impl Equirectangular {
    /// All angles in degrees.
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat0: f64, lat_ts: f64) -> Result<Self, ProjError> {
        let cos_lat_ts = lat_ts.to_radians().cos();
        if cos_lat_ts.abs() < 1e-12 {
            return Err(ProjError::InvalidParameter(format!(
                "standard parallel {lat_ts} collapses the x axis"
            )));
        }
        Ok(Self {
            ellipsoid,
            lon0: lon0.to_radians(),
            lat0: lat0.to_radians(),
            cos_lat_ts,
        })
    }
}

impl Projection for Equirectangular {
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError> {
        let x = self.ellipsoid.a * (geo.lng.to_radians() - self.lon0) * self.cos_lat_ts;
        let y = self.ellipsoid.a * (geo.lat.to_radians() - self.lat0);
        Ok(PlanarPoint::new(x, y))
    }

    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError> {
        let lng = self.lon0 + p.x / (self.ellipsoid.a * self.cos_lat_ts);
        let lat = self.lat0 + p.y / self.ellipsoid.a;
        Ok(GeoPoint {
            lat: lat.to_degrees(),
            lng: lng.to_degrees(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;

    #[test]
    fn test_lonlat_is_identity() {
        let p = LonLat.project(GeoPoint { lat: 50.5, lng: 30.5 }).unwrap();
        assert_eq!(p, PlanarPoint::new(30.5, 50.5));
        let g = LonLat.unproject(p).unwrap();
        assert_eq!(g, GeoPoint { lat: 50.5, lng: 30.5 });
    }

    #[test]
    fn test_roundtrip() {
        let proj = Equirectangular::new(WGS84, 0.0, 0.0, 0.0).unwrap();
        let g = GeoPoint { lat: 45.0, lng: 10.0 };
        let back = proj.unproject(proj.project(g).unwrap()).unwrap();
        assert_relative_eq!(back.lat, g.lat, epsilon = 1e-10);
        assert_relative_eq!(back.lng, g.lng, epsilon = 1e-10);
    }

    #[test]
    fn test_with_standard_parallel() {
        let proj = Equirectangular::new(WGS84, 0.0, 0.0, 30.0).unwrap();
        let p = proj.project(GeoPoint { lat: 0.0, lng: 1.0 }).unwrap();
        let expected_x = WGS84.a * 1.0_f64.to_radians() * 30.0_f64.to_radians().cos();
        assert_relative_eq!(p.x, expected_x, epsilon = 1e-6);
    }

    #[test]
    fn test_dateline() {
        let proj = Equirectangular::new(WGS84, 0.0, 0.0, 0.0).unwrap();
        let e = proj.project(GeoPoint { lat: 0.0, lng: 180.0 }).unwrap();
        let w = proj.project(GeoPoint { lat: 0.0, lng: -180.0 }).unwrap();
        assert_relative_eq!(e.x, -w.x, epsilon = 1e-6);
    }

    #[test]
    fn test_polar_standard_parallel_rejected() {
        assert!(Equirectangular::new(WGS84, 0.0, 0.0, 90.0).is_err());
    }
}
