//! Screen-space ellipse overlays for slippy maps.
//!
//! An [`shape::Ellipse`] takes a geographic center and two radii in the CRS's
//! planar unit and projects them to a pixel-space center and two pixel radii
//! for the current [`view::MapView`].

pub mod error;
pub mod geo;
pub mod proj;
pub mod shape;
pub mod transform;
pub mod view;

#[cfg(feature = "python")]
mod py;

pub use error::{EllipseError, ProjError};
pub use geo::{GeoBounds, GeoPoint, PixelBounds, Point};
pub use proj::{Crs, Projection};
pub use shape::{compute_geometry, ellipse, Circle, Ellipse, EllipseGeometry, EllipseOptions, Shape};
pub use view::{MapView, ViewTransform};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn map_ellipse(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
