//! Coordinate reference systems: a projection plus the transformation that
//! maps its planar output onto the zoom-dependent world pixel grid.

use std::f64::consts::PI;
use std::fmt;

use log::debug;

use crate::error::ProjError;
use crate::geo::{GeoPoint, PlanarPoint, Point};
use crate::proj::ellipsoid::WGS84;
use crate::proj::equirectangular::{Equirectangular, LonLat};
use crate::proj::mercator::SphericalMercator;
use crate::proj::proj4::Proj4Projection;
use crate::proj::Projection;
use crate::transform::Transformation;

/// How distances are measured in a CRS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Great-circle distances on the earth; radii are geodesic metres.
    Earth,
    /// Euclidean distances in planar units.
    Planar,
}

/// A CRS: projection, pixel transformation and distance model.
pub struct Crs {
    code: String,
    projection: Box<dyn Projection>,
    transformation: Transformation,
    distance: DistanceKind,
    base_scale: f64,
}

/// World size in pixels at zoom 0 for tiled CRSs.
const TILE_SIZE: f64 = 256.0;

impl Crs {
    pub fn new(
        code: impl Into<String>,
        projection: Box<dyn Projection>,
        transformation: Transformation,
        distance: DistanceKind,
    ) -> Self {
        Self {
            code: code.into(),
            projection,
            transformation,
            distance,
            base_scale: TILE_SIZE,
        }
    }

    /// Override the world size in pixels at zoom 0.
    pub fn with_base_scale(mut self, base_scale: f64) -> Self {
        self.base_scale = base_scale;
        self
    }

    /// Spherical Mercator, the usual web map CRS.
    pub fn epsg3857() -> Self {
        let scale = 0.5 / (PI * WGS84.a);
        Self::new(
            "EPSG:3857",
            Box::new(SphericalMercator::new()),
            Transformation::new(scale, 0.5, -scale, 0.5),
            DistanceKind::Earth,
        )
    }

    /// Plate Carrée in degrees.
    pub fn epsg4326() -> Self {
        Self::new(
            "EPSG:4326",
            Box::new(LonLat),
            Transformation::new(1.0 / 180.0, 1.0, -1.0 / 180.0, 0.5),
            DistanceKind::Earth,
        )
    }

    /// Flat CRS mapping longitude/latitude straight to x/y; at zoom 0 one
    /// planar unit is one pixel.
    pub fn simple() -> Self {
        Self::new(
            "Simple",
            Box::new(LonLat),
            Transformation::flip_y(),
            DistanceKind::Planar,
        )
        .with_base_scale(1.0)
    }

    /// Build a CRS from a code or PROJ string.
    ///
    /// Recognised natively: `EPSG:3857` (and aliases), `EPSG:4326`,
    /// `EPSG:4087`, `Simple`.
    /// UTM codes (`EPSG:326XX`, `EPSG:327XX`) and `+proj=` strings go through
    /// proj4rs.
    pub fn from_code(code: &str) -> Result<Self, ProjError> {
        let trimmed = code.trim();
        if trimmed.eq_ignore_ascii_case("simple") {
            return Ok(Self::simple());
        }
        if trimmed.starts_with("+proj=") {
            return Self::from_proj_string(trimmed, trimmed);
        }

        let epsg = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
            .and_then(|c| c.parse::<u32>().ok())
            .ok_or_else(|| ProjError::UnknownCrs(code.to_string()))?;

        match epsg {
            3857 | 900913 | 3785 => Ok(Self::epsg3857()),
            4326 => Ok(Self::epsg4326()),

            // World Equidistant Cylindrical, metres
            4087 | 32662 => {
                let proj = Equirectangular::new(WGS84, 0.0, 0.0, 0.0)?;
                let scale = 0.5 / (PI * WGS84.a);
                Ok(Self::new(
                    "EPSG:4087",
                    Box::new(proj),
                    Transformation::new(scale, 0.5, -scale, 0.5),
                    DistanceKind::Planar,
                ))
            }

            // UTM North: EPSG:326XX (zone 1–60)
            32601..=32660 => {
                let zone = epsg - 32600;
                let def = format!("+proj=utm +zone={zone} +datum=WGS84 +units=m +no_defs");
                Self::from_proj_string(trimmed, &def)
            }

            // UTM South: EPSG:327XX (zone 1–60)
            32701..=32760 => {
                let zone = epsg - 32700;
                let def = format!("+proj=utm +zone={zone} +south +datum=WGS84 +units=m +no_defs");
                Self::from_proj_string(trimmed, &def)
            }

            _ => Err(ProjError::UnknownCrs(code.to_string())),
        }
    }

    fn from_proj_string(code: &str, definition: &str) -> Result<Self, ProjError> {
        let proj = Proj4Projection::new(definition)?;
        // Metric CRSs share the 3857 world size so zoom levels stay comparable.
        let transformation = if proj.is_latlong() {
            Transformation::new(1.0 / 180.0, 1.0, -1.0 / 180.0, 0.5)
        } else {
            let scale = 0.5 / (PI * WGS84.a);
            Transformation::new(scale, 0.5, -scale, 0.5)
        };
        debug!("CRS {code} resolved through proj4rs: {definition}");
        Ok(Self::new(code, Box::new(proj), transformation, DistanceKind::Planar))
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    pub fn distance(&self) -> DistanceKind {
        self.distance
    }

    pub fn is_earth(&self) -> bool {
        self.distance == DistanceKind::Earth
    }

    /// Pixel scale factor at `zoom`: `base_scale * 2^zoom`.
    pub fn scale(&self, zoom: f64) -> f64 {
        self.base_scale * 2f64.powf(zoom)
    }

    /// Geographic position -> world pixel at `zoom`.
    pub fn geo_to_world_pixel(&self, geo: GeoPoint, zoom: f64) -> Result<Point, ProjError> {
        let planar = self.projection.project(geo)?;
        Ok(self.transformation.transform(planar, self.scale(zoom)))
    }

    /// World pixel at `zoom` -> geographic position.
    pub fn world_pixel_to_geo(&self, p: Point, zoom: f64) -> Result<GeoPoint, ProjError> {
        let planar = self.transformation.untransform(p, self.scale(zoom))?;
        self.projection.unproject(planar)
    }
}

impl Projection for Crs {
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError> {
        self.projection.project(geo)
    }

    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError> {
        self.projection.unproject(p)
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crs")
            .field("code", &self.code)
            .field("transformation", &self.transformation)
            .field("distance", &self.distance)
            .field("base_scale", &self.base_scale)
            .finish()
    }
}
