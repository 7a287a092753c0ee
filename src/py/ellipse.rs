//! PyO3 binding for the ellipse factory.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyString};
use serde_json::{Map, Number, Value};

use crate::geo::{GeoPoint, Point};
use crate::proj::Crs;
use crate::shape::{Ellipse, EllipseArgs, EllipseOptions, Shape};
use crate::view::MapView;

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Convert plain Python option values (None, bool, number, str, dict) to JSON.
fn to_json(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() || obj.is_instance_of::<PyFloat>() {
        let f: f64 = obj.extract()?;
        return Number::from_f64(f)
            .map(Value::Number)
            // JSON has no NaN; keep it out of the options object.
            .ok_or_else(|| value_error(format!("non-finite option value {f}")));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Value::String(s.to_str()?.to_owned()));
    }
    if let Ok(d) = obj.downcast::<PyDict>() {
        let mut map = Map::new();
        for (k, v) in d.iter() {
            map.insert(k.extract::<String>()?, to_json(&v)?);
        }
        return Ok(Value::Object(map));
    }
    Err(value_error(format!(
        "unsupported option value of type {}",
        obj.get_type().name()?
    )))
}

/// Python numbers, excluding `bool` (an `int` subclass).
fn is_number(obj: &Bound<'_, PyAny>) -> bool {
    !obj.is_instance_of::<PyBool>()
        && (obj.is_instance_of::<PyFloat>() || obj.is_instance_of::<PyInt>())
}

/// Read an options dict (or None). Numeric `radius` and `radiusY` are taken as
/// floats directly so NaN reaches the radius checks instead of the JSON layer.
fn extract_options(obj: &Bound<'_, PyAny>) -> PyResult<EllipseOptions> {
    if obj.is_none() {
        return Ok(EllipseOptions::default());
    }
    let dict = obj.downcast::<PyDict>().map_err(value_error)?;

    let (mut radius, mut radius_y) = (None, None);
    let mut rest = Map::new();
    for (k, v) in dict.iter() {
        let key: String = k.extract()?;
        let slot = match key.as_str() {
            "radius" => Some(&mut radius),
            "radiusY" => Some(&mut radius_y),
            _ => None,
        };
        match slot {
            Some(slot) if is_number(&v) => *slot = Some(v.extract::<f64>()?),
            _ => {
                rest.insert(key, to_json(&v)?);
            }
        }
    }
    EllipseOptions::from_parts(radius, radius_y, Value::Object(rest)).map_err(value_error)
}

#[pyclass(name = "Ellipse")]
pub struct PyEllipse {
    inner: Ellipse,
}

#[pymethods]
impl PyEllipse {
    #[getter]
    fn radius(&self) -> f64 {
        self.inner.radius()
    }

    #[getter]
    fn radius_y(&self) -> f64 {
        self.inner.radius_y()
    }

    #[getter]
    fn center(&self) -> (f64, f64) {
        let c = self.inner.center();
        (c.lat, c.lng)
    }

    fn set_radius(&mut self, radius: f64) -> PyResult<()> {
        self.inner.set_radius(radius).map_err(value_error)
    }

    fn set_radius_y(&mut self, radius_y: f64) -> PyResult<()> {
        self.inner.set_radius_y(radius_y).map_err(value_error)
    }

    /// Project onto a view and return (center_x, center_y, radius_x, radius_y) in pixels.
    #[pyo3(signature = (crs, zoom, origin=(0.0, 0.0)))]
    fn project(&mut self, crs: &str, zoom: f64, origin: (f64, f64)) -> PyResult<(f64, f64, f64, f64)> {
        let crs = Crs::from_code(crs).map_err(value_error)?;
        let mut view = MapView::new(crs, zoom);
        view.set_pixel_origin(Point::new(origin.0, origin.1));
        self.inner.project(&view).map_err(value_error)?;
        let g = self
            .inner
            .geometry()
            .ok_or_else(|| value_error("geometry missing after projection"))?;
        Ok((g.pixel_center.x, g.pixel_center.y, g.radius_x, g.radius_y))
    }

    fn options_json(&self) -> PyResult<String> {
        self.inner.options().to_json().map_err(value_error)
    }

    fn __repr__(&self) -> String {
        let c = self.inner.center();
        format!(
            "Ellipse(center=({}, {}), radius={}, radius_y={})",
            c.lat,
            c.lng,
            self.inner.radius(),
            self.inner.radius_y()
        )
    }
}

/// Create an ellipse.
///
/// Args:
///     lat, lng: Center in degrees.
///     options: Dict with `radius`, `radiusY` and style keys, or a number
///         (legacy form) used for both radii.
///     legacy_options: Style options for the legacy numeric form.
#[pyfunction]
#[pyo3(signature = (lat, lng, options=None, legacy_options=None))]
pub fn ellipse(
    lat: f64,
    lng: f64,
    options: Option<&Bound<'_, PyAny>>,
    legacy_options: Option<&Bound<'_, PyAny>>,
) -> PyResult<PyEllipse> {
    let center = GeoPoint::new(lat, lng).map_err(value_error)?;

    let options = match options {
        Some(o) if is_number(o) => EllipseArgs::Legacy {
            radius: o.extract()?,
            options: legacy_options
                .filter(|l| !l.is_none())
                .map(extract_options)
                .transpose()?,
        },
        Some(o) if o.is_none() || o.is_instance_of::<PyDict>() => {
            EllipseArgs::Options(extract_options(o)?)
        }
        // Anything else, `bool` included, is rejected as a malformed argument.
        Some(o) => EllipseArgs::from_values(to_json(o)?, None).map_err(value_error)?,
        None => EllipseArgs::Options(EllipseOptions::default()),
    };

    let inner = Ellipse::new(center, options.normalize()).map_err(value_error)?;
    Ok(PyEllipse { inner })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(py: Python<'_>, err: PyErr) -> String {
        assert!(err.is_instance_of::<PyValueError>(py));
        err.value_bound(py).to_string()
    }

    fn options<'py>(py: Python<'py>, entries: &[(&str, PyObject)]) -> Bound<'py, PyDict> {
        let d = PyDict::new_bound(py);
        for (k, v) in entries {
            d.set_item(*k, v).unwrap();
        }
        d
    }

    #[test]
    fn test_dict_options() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let d = options(
                py,
                &[
                    ("radius", 200.into_py(py)),
                    ("radiusY", 100.5.into_py(py)),
                    ("color", "#f00".into_py(py)),
                ],
            );
            let e = ellipse(50.5, 30.5, Some(d.as_any()), None).unwrap();
            assert_eq!((e.radius(), e.radius_y()), (200.0, 100.5));
            assert_eq!(e.inner.style().color, "#f00");
        });
    }

    #[test]
    fn test_dict_nan_radii_are_told_apart() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let d = options(
                py,
                &[("radius", f64::NAN.into_py(py)), ("radiusY", 1.0.into_py(py))],
            );
            let msg = message(py, ellipse(0.0, 0.0, Some(d.as_any()), None).err().unwrap());
            assert!(msg.starts_with("Ellipse radius must"), "{msg}");

            let d = options(
                py,
                &[("radius", 1.0.into_py(py)), ("radiusY", f64::NAN.into_py(py))],
            );
            let msg = message(py, ellipse(0.0, 0.0, Some(d.as_any()), None).err().unwrap());
            assert!(msg.starts_with("Ellipse radiusY must"), "{msg}");

            // radius is checked first
            let d = options(
                py,
                &[("radius", f64::NAN.into_py(py)), ("radiusY", f64::NAN.into_py(py))],
            );
            let msg = message(py, ellipse(0.0, 0.0, Some(d.as_any()), None).err().unwrap());
            assert!(msg.starts_with("Ellipse radius must"), "{msg}");
        });
    }

    #[test]
    fn test_legacy_number() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let radius = 25.into_py(py).into_bound(py);
            let style = options(
                py,
                &[("weight", 9.into_py(py)), ("radiusY", f64::NAN.into_py(py))],
            );
            let e = ellipse(0.0, 0.0, Some(&radius), Some(style.as_any())).unwrap();
            assert_eq!((e.radius(), e.radius_y()), (25.0, 25.0));
            assert_eq!(e.inner.style().weight, 9.0);

            let radius = f64::NAN.into_py(py).into_bound(py);
            let msg = message(py, ellipse(0.0, 0.0, Some(&radius), None).err().unwrap());
            assert!(msg.starts_with("Ellipse radius must"), "{msg}");
        });
    }

    #[test]
    fn test_bool_is_not_a_radius() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let flag = true.into_py(py).into_bound(py);
            let msg = message(py, ellipse(0.0, 0.0, Some(&flag), None).err().unwrap());
            assert!(msg.starts_with("Invalid options"), "{msg}");

            // A bool radius inside the dict goes through serde and fails there too.
            let d = options(py, &[("radius", true.into_py(py)), ("radiusY", 1.into_py(py))]);
            let msg = message(py, ellipse(0.0, 0.0, Some(d.as_any()), None).err().unwrap());
            assert!(msg.starts_with("Invalid options"), "{msg}");
        });
    }
}
