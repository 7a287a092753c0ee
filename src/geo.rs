//! Coordinate value types: geographic points, planar/pixel points and bounds.

use std::ops::{Add, Div, Sub};

use serde::{Deserialize, Serialize};

use crate::error::EllipseError;

/// A geographic position in degrees.
///
/// Points produced by `Projection::unproject` are not range-checked: offsetting
/// a center by a large planar radius can legitimately leave [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated point: both coordinates finite, latitude within [-90, 90].
    /// Longitude is left unwrapped; normalisation is up to the CRS.
    pub fn new(lat: f64, lng: f64) -> Result<Self, EllipseError> {
        if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(EllipseError::InvalidLatLng { lat, lng });
        }
        Ok(Self { lat, lng })
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = EllipseError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

/// A 2D point in planar (projected) or pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Projected, linear coordinates (CRS units, typically metres).
pub type PlanarPoint = Point;
/// Screen coordinates relative to the layer origin.
pub type PixelPoint = Point;

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
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

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub min: Point,
    pub max: Point,
}

impl PixelBounds {
    /// Bounds spanning `center ± half` on each axis.
    pub fn around(center: Point, half: Point) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Geographic rectangle given by its south-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing both corners, whatever their order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint {
                lat: a.lat.min(b.lat),
                lng: a.lng.min(b.lng),
            },
            north_east: GeoPoint {
                lat: a.lat.max(b.lat),
                lng: a.lng.max(b.lng),
            },
        }
    }
}
