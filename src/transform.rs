use crate::error::ProjError;
use crate::geo::Point;

/// Axis-aligned scale + offset mapping planar coordinates to world pixels.
///
/// For a zoom scale `s`:
///   px = s * (a * x + b)
///   py = s * (c * y + d)
///
/// A negative `c` flips the Y axis so that north is up on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Transformation {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Identity on X, Y flipped: one planar unit is one pixel at scale 1.
    pub const fn flip_y() -> Self {
        Self::new(1.0, 0.0, -1.0, 0.0)
    }

    /// Apply the forward transform: planar -> world pixels.
    pub fn transform(&self, p: Point, scale: f64) -> Point {
        Point::new(scale * (self.a * p.x + self.b), scale * (self.c * p.y + self.d))
    }

    /// Apply the inverse transform: world pixels -> planar.
    pub fn untransform(&self, p: Point, scale: f64) -> Result<Point, ProjError> {
        if self.a.abs() < f64::EPSILON || self.c.abs() < f64::EPSILON || scale == 0.0 {
            return Err(ProjError::InvalidParameter(
                "Singular transformation (zero axis scale)".into(),
            ));
        }
        Ok(Point::new(
            (p.x / scale - self.b) / self.a,
            (p.y / scale - self.d) / self.c,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_identity() {
        let t = Transformation::new(1.0, 0.0, 1.0, 0.0);
        let p = t.transform(Point::new(5.0, 10.0), 1.0);
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 10.0);
    }

    #[test]
    fn test_transform_with_offset_and_scale() {
        let t = Transformation::new(0.5, 1.0, -0.5, 2.0);
        let p = t.transform(Point::new(4.0, 4.0), 256.0);
        assert_relative_eq!(p.x, 256.0 * 3.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_untransform_roundtrip() {
        let t = Transformation::new(2.5e-8, 0.5, -2.5e-8, 0.5);
        let p = Point::new(1_234_567.0, -765_432.0);
        let px = t.transform(p, 1024.0);
        let back = t.untransform(px, 1024.0).unwrap();
        assert_relative_eq!(back.x, p.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-6);
    }

    #[test]
    fn test_singular_transformation() {
        let t = Transformation::new(0.0, 0.0, 1.0, 0.0);
        assert!(t.untransform(Point::new(1.0, 1.0), 1.0).is_err());
    }

    #[test]
    fn test_flip_y() {
        let p = Transformation::flip_y().transform(Point::new(30.5, 50.5), 1.0);
        assert_eq!(p, Point::new(30.5, -50.5));
    }
}
