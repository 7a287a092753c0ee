//! Circle overlay with a radius in metres (earth CRS) or planar units.

use std::f64::consts::PI;
use std::fmt;

use log::debug;

use crate::error::{EllipseError, ProjError};
use crate::geo::{GeoBounds, GeoPoint, PixelBounds, Point};
use crate::proj::ellipsoid::EARTH_MEAN_RADIUS;
use crate::proj::Projection;
use crate::shape::geometry::EllipseGeometry;
use crate::shape::options::PathStyle;
use crate::shape::{is_valid_radius, RedrawHook, Shape};
use crate::view::{MapView, ViewTransform};

pub struct Circle {
    center: GeoPoint,
    radius: f64,
    style: PathStyle,
    geometry: Option<EllipseGeometry>,
    on_redraw: Option<RedrawHook>,
}

impl Circle {
    pub fn new(center: GeoPoint, radius: f64, style: PathStyle) -> Result<Self, EllipseError> {
        if !is_valid_radius(radius) {
            return Err(EllipseError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            style,
            geometry: None,
            on_redraw: None,
        })
    }

    /// Register the callback fired whenever the shape needs a redraw.
    pub fn with_redraw_hook(mut self, hook: RedrawHook) -> Self {
        self.on_redraw = Some(hook);
        self
    }

    pub fn set_redraw_hook(&mut self, hook: Option<RedrawHook>) {
        self.on_redraw = hook;
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
        self.redraw();
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), EllipseError> {
        if !is_valid_radius(radius) {
            return Err(EllipseError::InvalidRadius(radius));
        }
        self.radius = radius;
        self.redraw();
        Ok(())
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: PathStyle) {
        self.style = style;
        self.redraw();
    }

    /// Geometry from the last projection pass, `None` while stale.
    pub fn geometry(&self) -> Option<&EllipseGeometry> {
        self.geometry.as_ref()
    }

    pub(crate) fn store_geometry(&mut self, geometry: EllipseGeometry) {
        self.geometry = Some(geometry);
    }

    pub(crate) fn clear_geometry(&mut self) {
        self.geometry = None;
    }

    /// Geodesic circle on an earth CRS: the latitude offset is exact on the
    /// sphere and the longitude offset comes from the spherical law of cosines.
    fn project_geodesic(&self, view: &MapView) -> Result<EllipseGeometry, ProjError> {
        let crs = view.crs();
        let zoom = view.zoom();
        let d = PI / 180.0;
        let (lat, lng) = (self.center.lat, self.center.lng);

        let lat_r = (self.radius / EARTH_MEAN_RADIUS) / d;
        let top = crs.geo_to_world_pixel(GeoPoint { lat: lat + lat_r, lng }, zoom)?;
        let bottom = crs.geo_to_world_pixel(GeoPoint { lat: lat - lat_r, lng }, zoom)?;
        let p = (top + bottom) / 2.0;
        let lat2 = crs.world_pixel_to_geo(p, zoom)?.lat;

        let mut lng_r = (((lat_r * d).cos() - (lat * d).sin() * (lat2 * d).sin())
            / ((lat * d).cos() * (lat2 * d).cos()))
        .acos()
            / d;
        if lng_r.is_nan() || lng_r == 0.0 {
            // Tiny radii lose the cosine difference to rounding.
            lng_r = lat_r / (d * lat).cos();
        }

        let radius_x = if lng_r.is_finite() {
            let side = crs.geo_to_world_pixel(GeoPoint { lat: lat2, lng: lng - lng_r }, zoom)?;
            p.x - side.x
        } else {
            debug!("Circle at {:?}: degenerate longitude offset", self.center);
            0.0
        };
        let radius_y = p.y - top.y;

        let p = if view.round_pixels() { p.round() } else { p };

        Ok(EllipseGeometry::new(
            self.center,
            crs.project(self.center)?,
            p - view.pixel_origin(),
            radius_x.abs(),
            radius_y.abs(),
        ))
    }

    /// Planar circle: offset west by the radius and measure on screen.
    fn project_planar(&self, view: &MapView) -> Result<EllipseGeometry, ProjError> {
        let crs = view.crs();
        let planar_center = crs.project(self.center)?;
        let west = crs.unproject(planar_center - Point::new(self.radius, 0.0))?;
        let pixel_center = view.geo_to_pixel(self.center)?;
        let radius = (pixel_center.x - view.geo_to_pixel(west)?.x).abs();
        Ok(EllipseGeometry::new(
            self.center,
            planar_center,
            pixel_center,
            radius,
            radius,
        ))
    }
}

/// Pixel box of `geometry` grown by the style's hit tolerance.
pub(crate) fn padded_bounds(geometry: &EllipseGeometry, style: &PathStyle) -> PixelBounds {
    let w = style.hit_tolerance();
    PixelBounds::around(
        geometry.pixel_center,
        Point::new(geometry.radius_x + w, geometry.radius_y + w),
    )
}

/// Geographic box of `geometry` read back through `view`.
pub(crate) fn geo_bounds_of(
    geometry: &EllipseGeometry,
    view: &dyn ViewTransform,
) -> Result<GeoBounds, ProjError> {
    let half = Point::new(geometry.radius_x, geometry.radius_y);
    let a = view.pixel_to_geo(geometry.pixel_center - half)?;
    let b = view.pixel_to_geo(geometry.pixel_center + half)?;
    Ok(GeoBounds::from_corners(a, b))
}

impl Shape for Circle {
    fn project(&mut self, view: &MapView) -> Result<(), ProjError> {
        // A failed pass must not leave the previous view's geometry behind.
        self.clear_geometry();
        let geometry = if view.crs().is_earth() {
            self.project_geodesic(view)?
        } else {
            self.project_planar(view)?
        };
        self.geometry = Some(geometry);
        Ok(())
    }

    fn pixel_bounds(&self) -> Option<PixelBounds> {
        self.geometry.as_ref().map(|g| padded_bounds(g, &self.style))
    }

    fn geo_bounds(&self, view: &dyn ViewTransform) -> Result<Option<GeoBounds>, ProjError> {
        self.geometry
            .as_ref()
            .map(|g| geo_bounds_of(g, view))
            .transpose()
    }

    fn redraw(&mut self) {
        self.geometry = None;
        if let Some(hook) = &self.on_redraw {
            hook();
        }
    }

    fn is_stale(&self) -> bool {
        self.geometry.is_none()
    }
}

impl fmt::Debug for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circle")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("style", &self.style)
            .field("geometry", &self.geometry)
            .field("has_redraw_hook", &self.on_redraw.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::PlanarPoint;
    use crate::proj::{Crs, DistanceKind};
    use crate::transform::Transformation;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Unreachable;

    impl Projection for Unreachable {
        fn project(&self, _: GeoPoint) -> Result<PlanarPoint, ProjError> {
            Err(ProjError::TransformFailed("out of domain".into()))
        }

        fn unproject(&self, _: PlanarPoint) -> Result<GeoPoint, ProjError> {
            Err(ProjError::TransformFailed("out of domain".into()))
        }
    }

    #[test]
    fn test_rejects_bad_radius() {
        let c = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(matches!(
            Circle::new(c, f64::NAN, PathStyle::default()),
            Err(EllipseError::InvalidRadius(r)) if r.is_nan()
        ));
        assert_eq!(
            Circle::new(c, -1.0, PathStyle::default()).unwrap_err(),
            EllipseError::InvalidRadius(-1.0)
        );
        assert!(Circle::new(c, f64::INFINITY, PathStyle::default()).is_err());
    }

    #[test]
    fn test_planar_circle() {
        let view = MapView::new(crate::proj::Crs::simple(), 1.0);
        let mut circle =
            Circle::new(GeoPoint::new(10.0, 10.0).unwrap(), 25.0, PathStyle::default()).unwrap();
        assert!(circle.is_stale());
        circle.project(&view).unwrap();
        let g = circle.geometry().unwrap();
        assert_relative_eq!(g.radius_x, 50.0);
        assert_relative_eq!(g.radius_y, 50.0);
    }

    #[test]
    fn test_geodesic_circle_is_round_on_screen() {
        let view = MapView::new(crate::proj::Crs::epsg3857(), 12.0);
        let mut circle =
            Circle::new(GeoPoint::new(51.5, -0.12).unwrap(), 1_000.0, PathStyle::default())
                .unwrap();
        circle.project(&view).unwrap();
        let g = circle.geometry().unwrap();
        assert!(g.radius_x > 0.0);
        assert_relative_eq!(g.radius_x, g.radius_y, max_relative = 1e-3);

        // Mercator resolution at zoom 12 is ~38.2 m/px at the equator, shrinking by cos(lat).
        let expected = 1_000.0 / (156_543.033_92 / 4096.0 * 51.5_f64.to_radians().cos());
        assert_relative_eq!(g.radius_y, expected, max_relative = 1e-2);
    }

    #[test]
    fn test_mutation_marks_stale_and_fires_hook() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let view = MapView::new(crate::proj::Crs::simple(), 0.0);
        let mut circle =
            Circle::new(GeoPoint::new(0.0, 0.0).unwrap(), 5.0, PathStyle::default())
                .unwrap()
                .with_redraw_hook(Arc::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }));

        circle.project(&view).unwrap();
        assert!(!circle.is_stale());

        circle.set_radius(6.0).unwrap();
        assert!(circle.is_stale());
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(circle.set_radius(f64::NAN).is_err());
        assert_eq!(circle.radius(), 6.0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        circle.set_center(GeoPoint::new(1.0, 1.0).unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pixel_bounds_include_stroke() {
        let view = MapView::new(crate::proj::Crs::simple(), 0.0);
        let mut circle =
            Circle::new(GeoPoint::new(0.0, 0.0).unwrap(), 10.0, PathStyle::default()).unwrap();
        assert_eq!(circle.pixel_bounds(), None);
        circle.project(&view).unwrap();
        let b = circle.pixel_bounds().unwrap();
        // weight 3 -> 1.5 px of padding on each side
        assert_relative_eq!(b.min.x, -11.5);
        assert_relative_eq!(b.max.y, 11.5);
    }

    #[test]
    fn test_failed_projection_drops_cached_geometry() {
        let mut circle =
            Circle::new(GeoPoint::new(10.0, 10.0).unwrap(), 25.0, PathStyle::default()).unwrap();
        circle.project(&MapView::new(Crs::simple(), 0.0)).unwrap();
        assert!(!circle.is_stale());

        let broken = Crs::new(
            "Broken",
            Box::new(Unreachable),
            Transformation::flip_y(),
            DistanceKind::Planar,
        )
        .with_base_scale(1.0);
        let err = circle.project(&MapView::new(broken, 0.0)).unwrap_err();
        assert!(matches!(err, ProjError::TransformFailed(_)));
        assert!(circle.is_stale());
        assert!(circle.geometry().is_none());
        assert_eq!(circle.pixel_bounds(), None);
    }

    #[test]
    fn test_geodesic_center_follows_pixel_rounding() {
        let center = GeoPoint::new(51.5, -0.12).unwrap();
        let mut view = MapView::new(Crs::epsg3857(), 12.3).with_pixel_rounding(true);
        view.set_pixel_origin(Point::new(500_000.0, 300_000.0));

        let mut circle = Circle::new(center, 1_000.0, PathStyle::default()).unwrap();
        circle.project(&view).unwrap();
        let rounded = circle.geometry().unwrap().pixel_center;
        assert_eq!(rounded.x.fract(), 0.0);
        assert_eq!(rounded.y.fract(), 0.0);

        let mut exact = Circle::new(center, 1_000.0, PathStyle::default()).unwrap();
        let mut view = MapView::new(Crs::epsg3857(), 12.3);
        view.set_pixel_origin(Point::new(500_000.0, 300_000.0));
        exact.project(&view).unwrap();
        let exact = exact.geometry().unwrap().pixel_center;
        assert!((exact.x - rounded.x).abs() <= 0.5);
        assert!((exact.y - rounded.y).abs() <= 0.5);
    }
}
