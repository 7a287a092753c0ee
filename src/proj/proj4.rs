use proj4rs::Proj;

use crate::error::ProjError;
use crate::geo::{GeoPoint, PlanarPoint};
use crate::proj::Projection;

const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Projection backed by proj4rs for any CRS without a native implementation.
///
/// proj4rs uses radians for geographic CRS while `GeoPoint` carries degrees;
/// the conversion happens here.
pub struct Proj4Projection {
    geo: Proj,
    dst: Proj,
    dst_is_geo: bool,
    definition: String,
}

impl Proj4Projection {
    /// Create a projection from a PROJ string ("+proj=utm +zone=33 ...").
    pub fn new(definition: &str) -> Result<Self, ProjError> {
        let geo = Proj::from_user_string(WGS84_LONGLAT)
            .map_err(|e| ProjError::UnknownCrs(format!("{WGS84_LONGLAT}: {e}")))?;
        let dst = Proj::from_user_string(definition)
            .map_err(|e| ProjError::UnknownCrs(format!("{definition}: {e}")))?;
        let dst_is_geo = dst.is_latlong();
        Ok(Self {
            geo,
            dst,
            dst_is_geo,
            definition: definition.to_string(),
        })
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn is_latlong(&self) -> bool {
        self.dst_is_geo
    }
}

impl std::fmt::Debug for Proj4Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proj4Projection")
            .field("definition", &self.definition)
            .finish()
    }
}

impl Projection for Proj4Projection {
    fn project(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjError> {
        let mut point = (geo.lng.to_radians(), geo.lat.to_radians());

        proj4rs::transform::transform(&self.geo, &self.dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            Ok(PlanarPoint::new(point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok(PlanarPoint::new(point.0, point.1))
        }
    }

    fn unproject(&self, p: PlanarPoint) -> Result<GeoPoint, ProjError> {
        let mut point = if self.dst_is_geo {
            (p.x.to_radians(), p.y.to_radians())
        } else {
            (p.x, p.y)
        };

        proj4rs::transform::transform(&self.dst, &self.geo, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        Ok(GeoPoint {
            lat: point.1.to_degrees(),
            lng: point.0.to_degrees(),
        })
    }
}
