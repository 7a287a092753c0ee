pub mod crs;
pub mod ellipsoid;
pub mod equirectangular;
pub mod mercator;
pub mod proj4;

use crate::error::ProjError;
use crate::geo::{GeoPoint, PlanarPoint};

pub use crs::{Crs, DistanceKind};

/// Trait for map projections supporting forward and inverse transforms.
///
/// Geographic coordinates are in degrees, planar coordinates in the
/// projection's linear unit. `project` and `unproject` must be mutually
/// inverse up to floating-point precision.
pub trait Projection {
    /// Forward: geographic -> planar
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError>;

    /// Inverse: planar -> geographic
    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError>;
}
