/// Reference ellipsoid. The projections here are all spherical forms, so
/// only the semi-major axis is carried.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
}

pub const WGS84: Ellipsoid = Ellipsoid { a: 6_378_137.0 };

/// Mean earth radius used for geodesic circle offsets.
pub const EARTH_MEAN_RADIUS: f64 = 6_371_000.0;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        assert_relative_eq!(WGS84.a, 6_378_137.0);
        assert!(EARTH_MEAN_RADIUS < WGS84.a);
    }
}
